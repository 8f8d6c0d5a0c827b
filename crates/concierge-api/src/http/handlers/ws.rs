//! WebSocket handler for a single widget session.
//!
//! `GET /api/v1/sessions/{id}/ws` upgrades to a WebSocket. Once connected,
//! the handler:
//!
//! - **Forwards events:** every [`WidgetEvent`] of the session is pushed to
//!   the client as a JSON text frame.
//! - **Receives commands:** incoming text frames are parsed as [`WsCommand`]
//!   and applied to the widget.
//!
//! Disconnecting does not cancel pending replies; they still land in the
//! transcript and the client can reconnect to keep listening.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use concierge_core::chat::ChatWidget;
use futures_util::{SinkExt, StreamExt};
use serde_json::json;
use tokio::sync::broadcast;

use super::parse_uuid;
use crate::http::error::AppError;
use crate::state::AppState;

/// Incoming command from a WebSocket client.
///
/// Unknown or malformed messages are logged and ignored.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WsCommand {
    Submit { text: String },
    ToggleOpen,
    ToggleMinimize,
    Cancel,
    /// Keep-alive ping. Server responds with `{"type":"pong"}`.
    Ping,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id)?;
    let widget = state.registry.get(&id)?;
    Ok(ws
        .on_upgrade(move |socket| handle_ws_connection(socket, widget))
        .into_response())
}

async fn handle_ws_connection(socket: WebSocket, widget: Arc<ChatWidget>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut event_rx = widget.subscribe();

    tracing::debug!(widget_id = %widget.id(), "WebSocket connected");

    loop {
        tokio::select! {
            _ = widget.closed() => {
                let _ = ws_sender.send(Message::Close(None)).await;
                break;
            }

            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(json) => {
                            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => tracing::warn!("Failed to serialize WidgetEvent: {err}"),
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(skipped = n, "WebSocket subscriber lagged, skipping {n} events");
                    }
                    // Widget shut down.
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = process_command(&text, &widget).await {
                            if ws_sender.send(Message::Text(reply.into())).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!("WebSocket receive error: {err}");
                        break;
                    }
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::debug!(widget_id = %widget.id(), "WebSocket connection closed");
}

/// Apply one client command. Returns a direct reply frame, if any.
///
/// State changes are reported through the event stream, not here.
async fn process_command(text: &str, widget: &ChatWidget) -> Option<String> {
    let cmd: WsCommand = match serde_json::from_str(text) {
        Ok(cmd) => cmd,
        Err(err) => {
            tracing::warn!(raw = %text, error = %err, "Ignoring malformed WebSocket command");
            return None;
        }
    };

    match cmd {
        WsCommand::Submit { text } => match widget.submit(&text).await {
            Ok(_) => None,
            Err(err) => Some(json!({ "type": "error", "message": err.to_string() }).to_string()),
        },
        WsCommand::ToggleOpen => {
            widget.toggle_open().await;
            None
        }
        WsCommand::ToggleMinimize => {
            widget.toggle_minimize().await;
            None
        }
        WsCommand::Cancel => {
            widget.cancel_pending().await;
            None
        }
        WsCommand::Ping => Some(r#"{"type":"pong"}"#.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use concierge_core::assistant::ReplyResolver;
    use concierge_types::config::WidgetConfig;

    use super::*;

    fn widget() -> ChatWidget {
        let config = WidgetConfig {
            attention_interval_ms: 0,
            ..WidgetConfig::default()
        };
        ChatWidget::spawn(ReplyResolver::new(), &config)
    }

    #[test]
    fn test_parse_commands() {
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"submit","text":"hi"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::Submit { text } if text == "hi"));
        let cmd: WsCommand = serde_json::from_str(r#"{"type":"toggle_open"}"#).unwrap();
        assert!(matches!(cmd, WsCommand::ToggleOpen));
    }

    #[tokio::test]
    async fn ping_gets_pong() {
        let reply = process_command(r#"{"type":"ping"}"#, &widget()).await;
        assert_eq!(reply.as_deref(), Some(r#"{"type":"pong"}"#));
    }

    #[tokio::test]
    async fn malformed_command_is_ignored() {
        let widget = widget();
        assert!(process_command("not json", &widget).await.is_none());
        assert!(process_command(r#"{"type":"reboot"}"#, &widget).await.is_none());
        assert!(widget.transcript().await.is_empty());
    }

    #[tokio::test]
    async fn submit_appends_and_blank_reports_error() {
        let widget = widget();
        assert!(process_command(r#"{"type":"submit","text":"services?"}"#, &widget).await.is_none());
        assert_eq!(widget.transcript().await.len(), 1);

        let reply = process_command(r#"{"type":"submit","text":"   "}"#, &widget).await.unwrap();
        assert!(reply.contains("\"error\""));
        assert_eq!(widget.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn toggle_commands_flip_flags() {
        let widget = widget();
        process_command(r#"{"type":"toggle_open"}"#, &widget).await;
        process_command(r#"{"type":"toggle_minimize"}"#, &widget).await;
        let snapshot = widget.snapshot().await;
        assert!(snapshot.is_open);
        assert!(snapshot.is_minimized);
    }
}
