//! Intent rule records and the first-match-wins dispatcher.
//!
//! A rule matches when the normalized utterance contains ANY of its keywords
//! as a substring. Rules are evaluated in slice order and the first match
//! wins, so overlapping keywords shadow later rules.

use std::fmt;

use concierge_types::reply::ReplyResult;
use serde::Serialize;

use super::normalize::Utterance;

/// Pure reply producer for a matched rule.
pub type Responder = fn(&Utterance) -> ReplyResult;

/// Coarse grouping of rules, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Navigation,
    Identity,
    TeamMember,
    TestimonialPerson,
    Product,
    Booking,
    Greeting,
    Thanks,
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleCategory::Navigation => "navigation",
            RuleCategory::Identity => "identity",
            RuleCategory::TeamMember => "team_member",
            RuleCategory::TestimonialPerson => "testimonial_person",
            RuleCategory::Product => "product",
            RuleCategory::Booking => "booking",
            RuleCategory::Greeting => "greeting",
            RuleCategory::Thanks => "thanks",
        };
        write!(f, "{s}")
    }
}

/// One keyword-triggered entry of the rule table.
///
/// `nested` rules are only consulted after this rule matched; when none of
/// them match, `respond` produces the reply.
pub struct IntentRule {
    pub name: &'static str,
    pub category: RuleCategory,
    /// Lowercase substrings, any-of.
    pub keywords: &'static [&'static str],
    /// Route requested when this rule wins. Nested rules inherit it.
    pub navigate: Option<&'static str>,
    pub respond: Responder,
    pub nested: &'static [IntentRule],
}

impl IntentRule {
    pub fn matches(&self, utterance: &Utterance) -> bool {
        utterance.contains_any(self.keywords)
    }

    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            name: self.name,
            category: self.category,
            keywords: self.keywords,
            navigate: self.navigate,
            nested: self.nested.iter().map(IntentRule::summary).collect(),
        }
    }
}

/// Serializable description of a rule, for listings.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub name: &'static str,
    pub category: RuleCategory,
    pub keywords: &'static [&'static str],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigate: Option<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<RuleSummary>,
}

impl fmt::Debug for IntentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentRule")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("keywords", &self.keywords)
            .field("navigate", &self.navigate)
            .field("nested", &self.nested.len())
            .finish()
    }
}

/// Return the first rule in `rules` that matches, if any.
pub fn first_match<'a>(rules: &'a [IntentRule], utterance: &Utterance) -> Option<&'a IntentRule> {
    rules.iter().find(|rule| rule.matches(utterance))
}
