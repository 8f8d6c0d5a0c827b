//! Widget session HTTP handlers.
//!
//! Endpoints:
//! - POST   /api/v1/sessions                       - Create a widget session
//! - GET    /api/v1/sessions/{id}                  - Snapshot of a session
//! - POST   /api/v1/sessions/{id}/messages         - Submit a user message
//! - POST   /api/v1/sessions/{id}/toggle-open      - Open or close the widget
//! - POST   /api/v1/sessions/{id}/toggle-minimize  - Minimize or restore
//! - POST   /api/v1/sessions/{id}/cancel           - Drop in-flight replies
//! - DELETE /api/v1/sessions/{id}                  - Tear the widget down
//!
//! Replies arrive after the thinking delay; poll the snapshot or listen on
//! `/api/v1/sessions/{id}/ws` to see them.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use concierge_core::chat::ChatWidget;
use concierge_types::chat::{ChatMessage, SessionSnapshot};
use serde::Serialize;
use uuid::Uuid;

use super::{parse_uuid, TextRequest};
use crate::http::error::AppError;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

/// A session snapshot tagged with its id.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    #[serde(flatten)]
    pub snapshot: SessionSnapshot,
}

async fn view(widget: &ChatWidget) -> SessionView {
    SessionView {
        id: widget.id(),
        snapshot: widget.snapshot().await,
    }
}

fn session_links<T: Serialize>(response: ApiResponse<T>, id: Uuid) -> ApiResponse<T> {
    response
        .with_link("self", &format!("/api/v1/sessions/{id}"))
        .with_link("messages", &format!("/api/v1/sessions/{id}/messages"))
        .with_link("events", &format!("/api/v1/sessions/{id}/ws"))
}

fn lookup(state: &AppState, id: &str) -> Result<Arc<ChatWidget>, AppError> {
    let id = parse_uuid(id)?;
    Ok(state.registry.get(&id)?)
}

/// POST /api/v1/sessions
pub async fn create_session(State(state): State<AppState>) -> ApiResponse<SessionView> {
    let timer = RequestTimer::start();
    let widget = state.registry.create();
    let id = widget.id();
    session_links(timer.finish(view(&widget).await), id)
}

/// GET /api/v1/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let timer = RequestTimer::start();
    let widget = lookup(&state, &id)?;
    Ok(session_links(timer.finish(view(&widget).await), widget.id()))
}

/// POST /api/v1/sessions/{id}/messages
///
/// Returns the appended user message; the reply follows asynchronously.
pub async fn submit_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TextRequest>,
) -> Result<ApiResponse<ChatMessage>, AppError> {
    let timer = RequestTimer::start();
    let widget = lookup(&state, &id)?;
    let message = widget.submit(&body.text).await?;
    Ok(session_links(timer.finish(message), widget.id()))
}

/// POST /api/v1/sessions/{id}/toggle-open
pub async fn toggle_open(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let timer = RequestTimer::start();
    let widget = lookup(&state, &id)?;
    widget.toggle_open().await;
    Ok(timer.finish(view(&widget).await))
}

/// POST /api/v1/sessions/{id}/toggle-minimize
pub async fn toggle_minimize(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let timer = RequestTimer::start();
    let widget = lookup(&state, &id)?;
    widget.toggle_minimize().await;
    Ok(timer.finish(view(&widget).await))
}

/// POST /api/v1/sessions/{id}/cancel
pub async fn cancel_pending(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<SessionView>, AppError> {
    let timer = RequestTimer::start();
    let widget = lookup(&state, &id)?;
    widget.cancel_pending().await;
    Ok(timer.finish(view(&widget).await))
}

/// DELETE /api/v1/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<serde_json::Value>, AppError> {
    let timer = RequestTimer::start();
    let id = parse_uuid(&id)?;
    state.registry.remove(&id)?;
    Ok(timer.finish(serde_json::json!({ "deleted": true, "id": id })))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::response::IntoResponse;
    use concierge_types::config::{ConciergeConfig, WidgetConfig};
    use concierge_types::error::ChatError;

    use super::*;

    fn test_state() -> AppState {
        let config = ConciergeConfig {
            widget: WidgetConfig {
                attention_interval_ms: 0,
                ..WidgetConfig::default()
            },
            ..ConciergeConfig::default()
        };
        AppState::new(config, std::env::temp_dir())
    }

    #[tokio::test(start_paused = true)]
    async fn submit_then_reply_lands_in_snapshot() {
        let state = test_state();
        let created = create_session(State(state.clone())).await;
        let id = created.data.as_ref().unwrap().id.to_string();

        let sent = submit_message(
            State(state.clone()),
            Path(id.clone()),
            Json(TextRequest { text: "Hello".into() }),
        )
        .await
        .unwrap();
        assert_eq!(sent.data.as_ref().unwrap().id, 1);

        let before = get_session(State(state.clone()), Path(id.clone())).await.unwrap();
        let before = before.data.unwrap().snapshot;
        assert!(before.is_typing);
        assert_eq!(before.transcript.len(), 1);

        tokio::time::sleep(Duration::from_millis(1_100)).await;

        let after = get_session(State(state), Path(id)).await.unwrap();
        let after = after.data.unwrap().snapshot;
        assert!(!after.is_typing);
        assert_eq!(after.transcript.len(), 2);
        assert!(after.transcript[1].content.starts_with("Hello! I'm Vera"));
    }

    #[tokio::test]
    async fn blank_message_is_bad_request() {
        let state = test_state();
        let created = create_session(State(state.clone())).await;
        let id = created.data.unwrap().id.to_string();

        let err = submit_message(State(state), Path(id), Json(TextRequest { text: "  ".into() }))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Chat(ChatError::EmptyUtterance)));
    }

    #[tokio::test]
    async fn unknown_and_malformed_ids() {
        let state = test_state();

        let err = get_session(State(state.clone()), Path("not-a-uuid".into()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), axum::http::StatusCode::BAD_REQUEST);

        let err = get_session(State(state), Path(Uuid::now_v7().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.into_response().status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn toggles_and_delete() {
        let state = test_state();
        let created = create_session(State(state.clone())).await;
        let id = created.data.unwrap().id.to_string();

        let opened = toggle_open(State(state.clone()), Path(id.clone())).await.unwrap();
        assert!(opened.data.unwrap().snapshot.is_open);

        let minimized = toggle_minimize(State(state.clone()), Path(id.clone())).await.unwrap();
        assert!(minimized.data.unwrap().snapshot.is_minimized);

        delete_session(State(state.clone()), Path(id.clone())).await.unwrap();
        assert!(state.registry.is_empty());
        assert!(get_session(State(state), Path(id)).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_drops_pending_reply() {
        let state = test_state();
        let created = create_session(State(state.clone())).await;
        let id = created.data.unwrap().id.to_string();

        submit_message(
            State(state.clone()),
            Path(id.clone()),
            Json(TextRequest { text: "book a demo".into() }),
        )
        .await
        .unwrap();
        let cancelled = cancel_pending(State(state.clone()), Path(id.clone())).await.unwrap();
        assert!(!cancelled.data.unwrap().snapshot.is_typing);

        tokio::time::sleep(Duration::from_millis(2_000)).await;
        let after = get_session(State(state), Path(id)).await.unwrap();
        assert_eq!(after.data.unwrap().snapshot.transcript.len(), 1);
    }
}
