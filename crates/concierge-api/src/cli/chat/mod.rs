//! Interactive terminal chat widget.
//!
//! Drives a [`concierge_core::chat::ChatWidget`] from a readline prompt and
//! prints its events as they arrive: the typing indicator, delayed replies
//! with their links, and navigation requests. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;
