//! Shared domain types for the Veridian concierge.
//!
//! This crate contains the types passed between the reply resolver, the chat
//! widget, and the CLI/REST surfaces: messages, replies, links, widget events,
//! configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod reply;
