//! In-memory state of one chat widget session.
//!
//! Holds the append-only transcript and the widget's UI flags. Nothing here
//! is persisted; dropping the state discards the conversation. Scheduling of
//! delayed replies lives in [`super::widget`], which drives this state.

use chrono::{DateTime, Utc};
use concierge_types::chat::{ChatMessage, Sender, SessionSnapshot};
use concierge_types::reply::{Link, ReplyResult};

use crate::assistant::normalize::is_blank;

/// Transcript plus open/minimized/typing flags for one widget.
#[derive(Debug, Clone)]
pub struct ChatSessionState {
    transcript: Vec<ChatMessage>,
    next_id: u64,
    is_open: bool,
    is_minimized: bool,
    is_typing: bool,
    attention: bool,
    last_navigation: Option<String>,
}

impl ChatSessionState {
    pub fn new(start_open: bool) -> Self {
        Self {
            transcript: Vec::new(),
            next_id: 1,
            is_open: start_open,
            is_minimized: false,
            is_typing: false,
            attention: false,
            last_navigation: None,
        }
    }

    /// Append the user's message and turn the typing indicator on.
    ///
    /// Blank input is ignored: returns `None` and leaves the state untouched.
    /// The text is stored exactly as given.
    pub fn submit(&mut self, text: &str) -> Option<ChatMessage> {
        if is_blank(text) {
            return None;
        }
        let message = self.append(Sender::User, text.to_string(), Vec::new());
        self.is_typing = true;
        Some(message)
    }

    /// Append the bot's reply and turn the typing indicator off.
    pub fn complete_reply(&mut self, reply: ReplyResult) -> ChatMessage {
        let ReplyResult {
            text,
            links,
            navigate_to,
        } = reply;
        let message = self.append(Sender::Bot, text, links);
        self.is_typing = false;
        if navigate_to.is_some() {
            self.last_navigation = navigate_to;
        }
        message
    }

    /// Clear the typing indicator after pending replies were cancelled.
    pub fn abandon_replies(&mut self) {
        self.is_typing = false;
    }

    /// Flip the open flag. Opening always clears the minimized flag.
    pub fn toggle_open(&mut self) -> bool {
        self.is_open = !self.is_open;
        if self.is_open {
            self.is_minimized = false;
        }
        self.is_open
    }

    pub fn toggle_minimize(&mut self) -> bool {
        self.is_minimized = !self.is_minimized;
        self.is_minimized
    }

    /// Set the launcher attention flag. Returns true if it changed.
    pub fn set_attention(&mut self, active: bool) -> bool {
        let changed = self.attention != active;
        self.attention = active;
        changed
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_minimized(&self) -> bool {
        self.is_minimized
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    pub fn attention(&self) -> bool {
        self.attention
    }

    pub fn last_navigation(&self) -> Option<&str> {
        self.last_navigation.as_deref()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            transcript: self.transcript.clone(),
            is_open: self.is_open,
            is_minimized: self.is_minimized,
            is_typing: self.is_typing,
            attention: self.attention,
            last_navigation: self.last_navigation.clone(),
        }
    }

    fn append(&mut self, sender: Sender, content: String, links: Vec<Link>) -> ChatMessage {
        let message = ChatMessage {
            id: self.next_id,
            content,
            sender,
            timestamp: self.next_timestamp(),
            links,
        };
        self.next_id += 1;
        self.transcript.push(message.clone());
        message
    }

    /// Wall-clock time, nudged forward so timestamps strictly increase.
    fn next_timestamp(&self) -> DateTime<Utc> {
        let now = Utc::now();
        match self.transcript.last() {
            Some(last) if now <= last.timestamp => {
                last.timestamp + chrono::Duration::microseconds(1)
            }
            _ => now,
        }
    }
}

impl Default for ChatSessionState {
    fn default() -> Self {
        Self::new(false)
    }
}
