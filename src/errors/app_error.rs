use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::core::convoai::ConvoAIError;
use crate::core::token::TokenError;

pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by HTTP handlers.
///
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    ConvoAI(#[from] ConvoAIError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ConvoAI(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::ConvoAI(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Token(TokenError::MissingChannel | TokenError::InvalidRole(_)) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
