//! First-match-wins reply resolver.
//!
//! `resolve` normalizes the utterance, walks the rule table in order,
//! descends into the winner's nested rules, and attaches the winner's
//! navigation target. When nothing matches it returns the fallback reply.
//! The function is total: every input string produces a reply.

use concierge_types::reply::ReplyResult;
use serde::Serialize;
use tracing::debug;

use super::normalize::Utterance;
use super::rule::{first_match, IntentRule};
use super::rules::{fallback_reply, FALLBACK_RULE, INTENT_RULES};

/// Which rule produced a reply, plus the reply itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Name of the top-level rule that matched, or `"fallback"`.
    pub rule: &'static str,
    /// Name of the nested rule that matched inside `rule`, if any.
    pub detail: Option<&'static str>,
    pub reply: ReplyResult,
}

/// Resolves utterances against a static rule table.
#[derive(Debug, Clone, Copy)]
pub struct ReplyResolver {
    rules: &'static [IntentRule],
}

impl ReplyResolver {
    /// Resolver over the concierge's own table.
    pub fn new() -> Self {
        Self::with_rules(INTENT_RULES)
    }

    /// Resolver over an arbitrary table, in the given order.
    pub fn with_rules(rules: &'static [IntentRule]) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &'static [IntentRule] {
        self.rules
    }

    pub fn resolve(&self, raw: &str) -> Resolution {
        let utterance = Utterance::new(raw);

        let Some(rule) = first_match(self.rules, &utterance) else {
            debug!(rule = FALLBACK_RULE, "No intent rule matched");
            return Resolution {
                rule: FALLBACK_RULE,
                detail: None,
                reply: fallback_reply(),
            };
        };

        let nested = first_match(rule.nested, &utterance);
        let (responder, navigate) = match nested {
            Some(sub) => (sub.respond, sub.navigate.or(rule.navigate)),
            None => (rule.respond, rule.navigate),
        };

        let mut reply = responder(&utterance);
        if reply.navigate_to.is_none() {
            reply.navigate_to = navigate.map(str::to_string);
        }

        debug!(
            rule = rule.name,
            detail = nested.map(|n| n.name),
            navigate = reply.navigate_to.as_deref(),
            "Intent rule matched"
        );

        Resolution {
            rule: rule.name,
            detail: nested.map(|n| n.name),
            reply,
        }
    }
}

impl Default for ReplyResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::rule::RuleCategory;
    use crate::assistant::rules::{PRIYA_QUOTE, SANDRA_QUOTE};

    fn resolve(text: &str) -> Resolution {
        ReplyResolver::new().resolve(text)
    }

    #[test]
    fn test_greeting() {
        let r = resolve("Hello");
        assert_eq!(r.rule, "greeting");
        assert!(r.reply.text.starts_with("Hello!"));
        assert!(r.reply.navigate_to.is_none());
    }

    #[test]
    fn test_navigation_rule_sets_target() {
        let r = resolve("What services do you have?");
        assert_eq!(r.rule, "nav.services");
        assert_eq!(r.reply.navigate_to.as_deref(), Some("/#services"));
    }

    #[test]
    fn test_mediwallet_any_case() {
        for text in ["mediwallet", "What is MediWallet?", "MEDIWALLET pricing"] {
            let r = resolve(text);
            assert_eq!(r.rule, "product.mediwallet", "input: {text}");
            assert!(r.reply.text.contains("health records"));
            assert!(!r.reply.links.is_empty());
        }
    }

    #[test]
    fn test_team_beats_person() {
        let r = resolve("Is Noopur on the team?");
        assert_eq!(r.rule, "nav.team");
    }

    #[test]
    fn test_team_beats_booking() {
        let r = resolve("Can I book a call with the team?");
        assert_eq!(r.rule, "nav.team");
        assert_eq!(r.reply.navigate_to.as_deref(), Some("/#team"));
    }

    #[test]
    fn test_testimonial_with_sandra_returns_quote_verbatim() {
        let r = resolve("Show me the testimonial from Sandra");
        assert_eq!(r.rule, "nav.testimonials");
        assert_eq!(r.detail, Some("testimonial.sandra"));
        assert_eq!(r.reply.text, SANDRA_QUOTE);
        assert_eq!(r.reply.navigate_to.as_deref(), Some("/#testimonials"));
    }

    #[test]
    fn test_testimonial_alone_returns_summary() {
        let r = resolve("testimonial");
        assert_eq!(r.rule, "nav.testimonials");
        assert_eq!(r.detail, None);
        assert!(r.reply.text.contains("Sandra"));
        assert!(r.reply.text.contains("Michael"));
        assert!(r.reply.text.contains("Priya"));
    }

    #[test]
    fn test_bare_person_name_uses_nested_quote() {
        let r = resolve("What did Priya say?");
        assert_eq!(r.rule, "testimonial.person");
        assert_eq!(r.detail, Some("testimonial.priya"));
        assert_eq!(r.reply.text, PRIYA_QUOTE);
    }

    #[test]
    fn test_role_word_alone_is_not_a_testimonial() {
        let r = resolve("Do you work with clinics?");
        assert_eq!(r.rule, "fallback");
        assert!(r.reply.navigate_to.is_none());
    }

    #[test]
    fn test_role_word_disambiguates_under_testimonials() {
        let r = resolve("any testimonial from a clinic?");
        assert_eq!(r.rule, "nav.testimonials");
        assert_eq!(r.detail, Some("testimonial.sandra"));
        assert_eq!(r.reply.text, SANDRA_QUOTE);
    }

    #[test]
    fn test_fallback() {
        let r = resolve("What's the weather like on Mars?");
        assert_eq!(r.rule, "fallback");
        assert_eq!(r.reply.links.len(), 2);
        assert!(r.reply.navigate_to.is_none());
    }

    #[test]
    fn test_idempotent() {
        let resolver = ReplyResolver::new();
        for text in ["Hello", "testimonial sandra", "zzz", "Book a demo"] {
            assert_eq!(resolver.resolve(text), resolver.resolve(text));
        }
    }

    #[test]
    fn test_resolution_serializes_rule_and_reply() {
        let value = serde_json::to_value(resolve("testimonial from sandra")).unwrap();
        assert_eq!(value["rule"], "nav.testimonials");
        assert_eq!(value["detail"], "testimonial.sandra");
        assert_eq!(value["reply"]["text"], SANDRA_QUOTE);
        assert_eq!(value["reply"]["navigate_to"], "/#testimonials");
    }

    fn custom_reply(_: &Utterance) -> ReplyResult {
        ReplyResult::new("custom")
    }

    static CUSTOM: &[IntentRule] = &[IntentRule {
        name: "custom",
        category: RuleCategory::Greeting,
        keywords: &["ping"],
        navigate: Some("/pong"),
        respond: custom_reply,
        nested: &[],
    }];

    #[test]
    fn test_with_rules_uses_given_table() {
        let resolver = ReplyResolver::with_rules(CUSTOM);
        let r = resolver.resolve("PING?");
        assert_eq!(r.rule, "custom");
        assert_eq!(r.reply.navigate_to.as_deref(), Some("/pong"));
        assert_eq!(resolver.resolve("Hello").rule, "fallback");
    }
}
