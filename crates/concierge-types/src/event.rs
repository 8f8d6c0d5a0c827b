//! Events published by a chat widget as its session changes.
//!
//! Subscribers (the terminal chat loop, WebSocket clients) render from these
//! instead of polling the session state.

use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// A user or bot message was appended to the transcript.
    MessageAppended { message: ChatMessage },

    /// The typing indicator turned on or off.
    TypingChanged { is_typing: bool },

    /// A delivered reply asked the host to navigate. Fire-and-forget.
    NavigationRequested { target: String },

    /// Open/minimized flags changed.
    VisibilityChanged { is_open: bool, is_minimized: bool },

    /// The closed launcher started or stopped its attention pulse.
    AttentionChanged { active: bool },

    /// A pending reply was dropped before delivery.
    ReplyCancelled { trigger_id: u64 },

    /// The widget was shut down (deleted or expired). Nothing follows.
    SessionClosed,
}
