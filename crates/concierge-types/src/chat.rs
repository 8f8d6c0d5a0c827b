//! Chat transcript types for the concierge widget.
//!
//! These types model one browser-session conversation: the messages shown in
//! the transcript and a serializable snapshot of the widget's UI flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::reply::Link;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Bot => write!(f, "bot"),
        }
    }
}

impl FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Sender::User),
            "bot" => Ok(Sender::Bot),
            other => Err(format!("invalid sender: '{other}'")),
        }
    }
}

/// A single transcript entry.
///
/// Ids start at 1 and increase by one per message within a session.
/// User messages keep the text exactly as typed; bot messages carry the
/// resolved reply text and its links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub links: Vec<Link>,
}

/// Point-in-time view of a widget session, as served to the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub transcript: Vec<ChatMessage>,
    pub is_open: bool,
    pub is_minimized: bool,
    pub is_typing: bool,
    /// Launcher attention animation currently showing.
    pub attention: bool,
    /// Most recent navigation target requested by a delivered reply.
    pub last_navigation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_roundtrip() {
        for sender in [Sender::User, Sender::Bot] {
            let parsed: Sender = sender.to_string().parse().unwrap();
            assert_eq!(sender, parsed);
        }
        assert!("assistant".parse::<Sender>().is_err());
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::Bot).unwrap();
        assert_eq!(json, "\"bot\"");
    }

    #[test]
    fn test_chat_message_serialize() {
        let message = ChatMessage {
            id: 3,
            content: "Hello".to_string(),
            sender: Sender::User,
            timestamp: Utc::now(),
            links: Vec::new(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"sender\":\"user\""));
        assert!(json.contains("\"id\":3"));
    }
}
