//! Configuration types for the concierge.
//!
//! `ConciergeConfig` represents the top-level `config.toml` that controls the
//! widget's timing and the REST server's bind address.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.concierge/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConciergeConfig {
    #[serde(default)]
    pub widget: WidgetConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

/// Timing and sizing for a chat widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetConfig {
    /// Simulated "thinking" delay between a submission and its reply.
    #[serde(default = "default_thinking_delay_ms")]
    pub thinking_delay_ms: u64,

    /// Period of the closed launcher's attention pulse.
    #[serde(default = "default_attention_interval_ms")]
    pub attention_interval_ms: u64,

    /// How long each attention pulse stays on.
    #[serde(default = "default_attention_pulse_ms")]
    pub attention_pulse_ms: u64,

    /// Whether new widgets start open.
    #[serde(default)]
    pub start_open: bool,

    /// Broadcast capacity of each widget's event bus.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Server-side sessions idle this long are shut down and evicted.
    /// Zero keeps them until deleted.
    #[serde(default = "default_session_idle_ttl_ms")]
    pub session_idle_ttl_ms: u64,
}

fn default_thinking_delay_ms() -> u64 {
    1_000
}

fn default_attention_interval_ms() -> u64 {
    5_000
}

fn default_attention_pulse_ms() -> u64 {
    1_000
}

fn default_event_capacity() -> usize {
    256
}

fn default_session_idle_ttl_ms() -> u64 {
    30 * 60 * 1_000
}

impl WidgetConfig {
    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn attention_interval(&self) -> Duration {
        Duration::from_millis(self.attention_interval_ms)
    }

    pub fn attention_pulse(&self) -> Duration {
        Duration::from_millis(self.attention_pulse_ms)
    }

    pub fn session_idle_ttl(&self) -> Duration {
        Duration::from_millis(self.session_idle_ttl_ms)
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            thinking_delay_ms: default_thinking_delay_ms(),
            attention_interval_ms: default_attention_interval_ms(),
            attention_pulse_ms: default_attention_pulse_ms(),
            start_open: false,
            event_capacity: default_event_capacity(),
            session_idle_ttl_ms: default_session_idle_ttl_ms(),
        }
    }
}

/// Bind address for `concierge serve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
