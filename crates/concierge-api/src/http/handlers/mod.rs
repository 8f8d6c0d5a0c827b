//! HTTP request handlers grouped by resource.

pub mod resolve;
pub mod rules;
pub mod session;
pub mod ws;

use serde::Deserialize;
use uuid::Uuid;

use super::error::AppError;

/// Request body carrying a user's message.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

/// Parse a UUID from a path parameter, returning a 400 error on invalid format.
pub(crate) fn parse_uuid(s: &str) -> Result<Uuid, AppError> {
    s.parse::<Uuid>()
        .map_err(|_| AppError::Validation(format!("Invalid UUID: {s}")))
}
