use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Persistence failure (constraint violation, connection trouble); the
    /// raw message is passed through, callers get no structured code.
    #[error("{0}")]
    Storage(#[from] anyhow::Error),

    #[error("No business found (run bootstrap)")]
    MissingBusiness,

    #[error("{0}")]
    Validation(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("not allowed: {0}")]
    Forbidden(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::MissingBusiness => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        let body = serde_json::json!({ "ok": false, "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
