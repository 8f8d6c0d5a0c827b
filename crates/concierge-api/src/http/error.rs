//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use concierge_types::error::ChatError;

use super::response::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    Chat(ChatError),
    /// Malformed request input (bad UUID, bad body).
    Validation(String),
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl AppError {
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Chat(ChatError::EmptyUtterance) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", "Message text is empty".to_string())
            }
            AppError::Chat(e @ ChatError::SessionNotFound(_)) => {
                (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND", e.to_string())
            }
            AppError::Chat(e @ ChatError::WidgetClosed) => {
                (StatusCode::GONE, "SESSION_CLOSED", e.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        tracing::debug!(%status, code, "Request failed: {message}");

        let body = ApiResponse::error(code, &message, String::new());
        (status, body).into_response()
    }
}
