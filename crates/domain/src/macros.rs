//! Display/FromStr generation for the string-backed enums stored in SQLite.
//!
//! ```rust
//! use covera_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum ShiftState {
//!     OnDuty,
//!     OffDuty,
//! }
//!
//! impl_domain_status_conversions!(ShiftState {
//!     OnDuty => "on_duty",
//!     OffDuty => "off_duty",
//! });
//!
//! assert_eq!(ShiftState::OnDuty.to_string(), "on_duty");
//! assert_eq!("OFF_DUTY".parse::<ShiftState>().ok(), Some(ShiftState::OffDuty));
//! ```

/// Implements `Display`, `FromStr` and `as_str` for a fieldless enum.
///
/// Parsing is case-insensitive; output is always the canonical lowercase
/// string given in the mapping.
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string form used in storage and on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
