//! HTTP/REST API layer for the concierge.
//!
//! Axum-based REST API at `/api/v1/` with envelope response format, CORS
//! support, and a per-session WebSocket event stream.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
