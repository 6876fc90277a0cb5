//! Conversions from external infrastructure errors into domain errors.

use covera_domain::CoveraError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub CoveraError);

impl From<InfraError> for CoveraError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<CoveraError> for InfraError {
    fn from(value: CoveraError) -> Self {
        InfraError(value)
    }
}

trait IntoCoveraError {
    fn into_covera(self) -> CoveraError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → CoveraError */
/* -------------------------------------------------------------------------- */

/// `SQLITE_CONSTRAINT_UNIQUE`
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;
/// `SQLITE_CONSTRAINT_PRIMARYKEY`
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
/// `SQLITE_CONSTRAINT_FOREIGNKEY`
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;

impl IntoCoveraError for SqlError {
    fn into_covera(self) -> CoveraError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => CoveraError::Database("database is busy".into()),
                    (ErrorCode::DatabaseLocked, _) => {
                        CoveraError::Database("database is locked".into())
                    }
                    (
                        ErrorCode::ConstraintViolation,
                        SQLITE_CONSTRAINT_UNIQUE | SQLITE_CONSTRAINT_PRIMARYKEY,
                    ) => CoveraError::Conflict(format!("unique constraint violation: {message}")),
                    (ErrorCode::ConstraintViolation, SQLITE_CONSTRAINT_FOREIGNKEY) => {
                        CoveraError::InvalidInput("referenced record does not exist".into())
                    }
                    _ => CoveraError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => CoveraError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                CoveraError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, name, ty) => {
                CoveraError::Database(format!("invalid column type for {name}: {ty}"))
            }
            RE::Utf8Error(_) => CoveraError::Database("invalid UTF-8 returned from sqlite".into()),
            RE::InvalidPath(path) => CoveraError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => CoveraError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_covera())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → CoveraError */
/* -------------------------------------------------------------------------- */

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(CoveraError::Database(format!("connection pool: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → CoveraError */
/* -------------------------------------------------------------------------- */

impl IntoCoveraError for HttpError {
    fn into_covera(self) -> CoveraError {
        if self.is_timeout() {
            return CoveraError::Network("HTTP request timed out".into());
        }
        if self.is_connect() {
            return CoveraError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 => CoveraError::Auth(message),
                403 => CoveraError::Forbidden(message),
                404 => CoveraError::NotFound(message),
                400..=499 => CoveraError::InvalidInput(message),
                _ => CoveraError::Network(message),
            };
        }

        CoveraError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_covera())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
