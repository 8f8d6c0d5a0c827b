//! GET /api/v1/rules - the intent table in evaluation order.

use axum::extract::State;
use concierge_core::assistant::RuleSummary;

use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

pub async fn list_rules(State(state): State<AppState>) -> ApiResponse<Vec<RuleSummary>> {
    let timer = RequestTimer::start();
    let summaries = state.resolver.rules().iter().map(|r| r.summary()).collect();
    timer.finish(summaries).with_link("self", "/api/v1/rules")
}
