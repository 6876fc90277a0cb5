//! JSON error envelope for every route

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use covera_domain::CoveraError;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    #[serde(rename = "type")]
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    success: bool,
    error: ErrorBody,
}

/// Domain error on its way out as `{ success: false, error: { type, message } }`
#[derive(Debug)]
pub struct ApiError(pub CoveraError);

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CoveraError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoveraError::Auth(_) => StatusCode::UNAUTHORIZED,
            CoveraError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoveraError::NotFound(_) => StatusCode::NOT_FOUND,
            CoveraError::Conflict(_) => StatusCode::CONFLICT,
            CoveraError::Network(_) => StatusCode::BAD_GATEWAY,
            CoveraError::Database(_) | CoveraError::Config(_) | CoveraError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<CoveraError> for ApiError {
    fn from(err: CoveraError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(CoveraError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(CoveraError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "internal server error".to_string()
        } else {
            match &self.0 {
                CoveraError::InvalidInput(m)
                | CoveraError::Auth(m)
                | CoveraError::Forbidden(m)
                | CoveraError::NotFound(m)
                | CoveraError::Conflict(m)
                | CoveraError::Network(m)
                | CoveraError::Database(m)
                | CoveraError::Config(m)
                | CoveraError::Internal(m) => m.clone(),
            }
        };

        let body = ErrorEnvelope { success: false, error: ErrorBody { kind: self.0.label(), message } };
        (status, Json(body)).into_response()
    }
}
