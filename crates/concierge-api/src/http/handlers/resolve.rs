//! POST /api/v1/resolve - stateless reply resolution.

use axum::extract::State;
use axum::Json;
use concierge_core::assistant::normalize::is_blank;
use concierge_core::assistant::Resolution;
use concierge_types::error::ChatError;

use super::TextRequest;
use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

pub async fn resolve(
    State(state): State<AppState>,
    Json(body): Json<TextRequest>,
) -> Result<ApiResponse<Resolution>, AppError> {
    let timer = RequestTimer::start();

    if is_blank(&body.text) {
        return Err(ChatError::EmptyUtterance.into());
    }

    let resolution = state.resolver.resolve(&body.text);
    Ok(timer.finish(resolution).with_link("rules", "/api/v1/rules"))
}
