//! Reply resolution and chat widget state for the Veridian concierge.
//!
//! `assistant` holds the pure side: utterance normalization, the ordered
//! intent rule table, and the first-match-wins resolver. `chat` holds the
//! stateful side: the session transcript, the widget driver that delivers
//! replies after the thinking delay, and the registry used by the server.

pub mod assistant;
pub mod chat;
pub mod event;
