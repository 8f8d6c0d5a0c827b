//! Reply and link types produced by the reply resolver.

use serde::{Deserialize, Serialize};

/// How a link target must be activated by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    /// Route path or in-page anchor; handled by client-side navigation.
    Internal,
    /// Full URL; opened in a new context.
    External,
}

/// A clickable action attached to a bot reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub target: String,
}

impl Link {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }

    /// Classify the target by shape: anything with a scheme is external.
    pub fn kind(&self) -> LinkKind {
        let target = self.target.trim();
        if target.contains("://") || target.starts_with("mailto:") || target.starts_with("tel:") {
            LinkKind::External
        } else {
            LinkKind::Internal
        }
    }
}

/// The outcome of resolving one utterance.
///
/// `navigate_to` is a fire-and-forget request for the host router; the
/// resolver never waits on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResult {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
}

impl ReplyResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            links: Vec::new(),
            navigate_to: None,
        }
    }

    /// Append a link, keeping insertion order.
    pub fn with_link(mut self, label: impl Into<String>, target: impl Into<String>) -> Self {
        self.links.push(Link::new(label, target));
        self
    }

    /// Request navigation to `target` when this reply is delivered.
    pub fn navigate(mut self, target: impl Into<String>) -> Self {
        self.navigate_to = Some(target.into());
        self
    }
}
