//! Chat widget session state and reply delivery.
//!
//! `session` is the plain transcript + flags; `widget` drives it with the
//! thinking delay, cancellation, and event publishing; `registry` holds the
//! live widgets served over HTTP.

mod attention;
pub mod registry;
pub mod session;
pub mod widget;

pub use registry::WidgetRegistry;
pub use session::ChatSessionState;
pub use widget::ChatWidget;
