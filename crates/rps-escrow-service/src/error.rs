//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rps_escrow_core::{LedgerError, RegistryError};

#[derive(Debug)]
pub enum AppError {
    Registry(RegistryError),
    Unauthorized(&'static str),
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Registry(err) => match err {
                RegistryError::GameNotFound(_) => StatusCode::NOT_FOUND,
                RegistryError::NotYourGame(_) | RegistryError::OwnGame(_) => StatusCode::FORBIDDEN,
                RegistryError::GameNotAvailable(_) | RegistryError::TimeoutNotYetReached { .. } => {
                    StatusCode::CONFLICT
                }
                RegistryError::Escrow(LedgerError::InsufficientFunds { .. }) => {
                    StatusCode::PAYMENT_REQUIRED
                }
                RegistryError::Escrow(_) => StatusCode::INTERNAL_SERVER_ERROR,
                RegistryError::InsufficientBet { .. }
                | RegistryError::IncorrectBetAmount { .. }
                | RegistryError::InvalidReveal(_) => StatusCode::BAD_REQUEST,
            },
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Registry(err) => write!(f, "{}", err),
            AppError::Unauthorized(msg) => f.write_str(msg),
            AppError::BadRequest(msg) => f.write_str(msg),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        AppError::Registry(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
