//! Rule-based reply resolution.
//!
//! Pure and synchronous: no I/O, no shared mutable state. The same utterance
//! always resolves to the same reply.

pub mod normalize;
pub mod resolver;
pub mod rule;
pub mod rules;

pub use normalize::Utterance;
pub use resolver::{Resolution, ReplyResolver};
pub use rule::{IntentRule, RuleCategory, RuleSummary};
