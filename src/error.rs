use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Request-boundary error taxonomy. Every failure a client can observe
/// maps onto exactly one of these variants; notification failures are
/// deliberately absent because they are never surfaced to the checkout
/// caller (they live in the Confirmation record instead).
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(String),

    #[error("Authorization declined: {0}")]
    AuthorizationDeclined(String),

    #[error("Authorization unavailable: {0}")]
    AuthorizationUnavailable(String),

    #[error("Missing fields: {0}")]
    MissingFields(String),

    #[error("Bad format: {0}")]
    BadFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCart(_) => StatusCode::BAD_REQUEST,
            AppError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            AppError::AuthorizationDeclined(_) => StatusCode::PAYMENT_REQUIRED,
            AppError::AuthorizationUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::MissingFields(_) => StatusCode::BAD_REQUEST,
            AppError::BadFormat(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code, used in the JSON error body so
    /// clients can branch without parsing the human message.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidCart(_) => "InvalidCart",
            AppError::UnsupportedMethod(_) => "UnsupportedMethod",
            AppError::AuthorizationDeclined(_) => "AuthorizationDeclined",
            AppError::AuthorizationUnavailable(_) => "AuthorizationUnavailable",
            AppError::MissingFields(_) => "MissingFields",
            AppError::BadFormat(_) => "BadFormat",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
