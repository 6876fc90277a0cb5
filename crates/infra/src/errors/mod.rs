//! Infrastructure error handling

mod conversions;

pub use conversions::InfraError;
use covera_domain::CoveraError;

/// Convert a `rusqlite` error into the domain error.
pub(crate) fn map_sql_error(err: rusqlite::Error) -> CoveraError {
    CoveraError::from(InfraError::from(err))
}

/// A blocking database task panicked or was cancelled.
pub(crate) fn map_join_error(err: tokio::task::JoinError) -> CoveraError {
    CoveraError::Internal(format!("Task join error: {err}"))
}
