use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced around a chat session.
///
/// The reply resolver itself never fails; these cover the layers that feed it.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("utterance is empty")]
    EmptyUtterance,

    #[error("chat session {0} not found")]
    SessionNotFound(Uuid),

    #[error("chat widget has been shut down")]
    WidgetClosed,
}

/// Errors from loading `config.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}
