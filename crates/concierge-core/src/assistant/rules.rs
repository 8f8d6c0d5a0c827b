//! The concierge's intent rule table.
//!
//! Order is significant and fixed: navigation, identity/about, team members,
//! testimonial persons, product, booking, greeting, thanks. Anything else
//! falls through to [`fallback_reply`].

use concierge_types::reply::ReplyResult;

use super::normalize::Utterance;
use super::rule::{IntentRule, RuleCategory};

/// Name reported when no rule matched.
pub const FALLBACK_RULE: &str = "fallback";

pub const SANDRA_QUOTE: &str = "\"Veridian AI helped us digitize patient intake in six weeks. \
Our front desk finally has time for patients again.\" (Sandra Ortiz, Clinic Director, \
Lakeside Family Clinic)";

pub const MICHAEL_QUOTE: &str = "\"Route planning that used to take a full day now takes \
minutes, and our drivers trust the plans.\" (Michael Chen, Operations Lead, Northline Logistics)";

pub const PRIYA_QUOTE: &str = "\"Their demand forecasting cut our overstock by a third in a \
single season.\" (Priya Nair, Founder, Bloom & Co. Retail)";

// --- responders ---

fn reply_home(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Taking you to our home page. Veridian AI helps teams put practical AI to work.",
    )
}

fn reply_services(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "We offer AI strategy workshops, custom model development, workflow automation, \
         and data engineering. I've opened our services section for you.",
    )
    .with_link("Book a consultation", "/#contact")
}

fn reply_team(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Meet the people behind Veridian AI, led by our founder Noopur and our CTO Rahul. \
         I've opened the team section for you.",
    )
}

fn reply_contact(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "You can reach us at hello@veridian.ai or through the contact form. \
         I've scrolled you to it.",
    )
    .with_link("Email us", "mailto:hello@veridian.ai")
}

fn reply_partners(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "We work with cloud and data platform partners to deliver projects end to end. \
         Take a look at our partners section.",
    )
}

fn reply_testimonials(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Our clients say it best. Sandra (Lakeside Family Clinic), Michael (Northline \
         Logistics) and Priya (Bloom & Co. Retail) have all shared their experiences. \
         Ask me about any of them!",
    )
}

fn reply_sandra(_: &Utterance) -> ReplyResult {
    ReplyResult::new(SANDRA_QUOTE)
}

fn reply_michael(_: &Utterance) -> ReplyResult {
    ReplyResult::new(MICHAEL_QUOTE)
}

fn reply_priya(_: &Utterance) -> ReplyResult {
    ReplyResult::new(PRIYA_QUOTE)
}

fn reply_newsletter(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Subscribe to our newsletter for monthly notes on applied AI. \
         The signup form is just below.",
    )
}

fn reply_identity(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "I'm Vera, Veridian AI's website assistant. I'm rule-based, not a language model: \
         I can point you around the site and answer common questions.",
    )
}

fn reply_about(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Veridian AI is a small consultancy that helps organizations adopt practical AI, \
         from first strategy session to production. We work mostly with healthcare, \
         logistics and retail teams.",
    )
    .with_link("Meet the team", "/#team")
    .with_link("Our services", "/#services")
}

fn reply_noopur(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Noopur is the founder and CEO of Veridian AI, with more than a decade of \
         experience bringing machine learning into healthcare operations.",
    )
    .with_link("Meet the team", "/#team")
}

fn reply_rahul(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Rahul is our Chief Technology Officer and leads model development and MLOps \
         for every client engagement.",
    )
    .with_link("Meet the team", "/#team")
}

fn reply_mediwallet(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "MediWallet is our secure digital health records wallet. It keeps prescriptions, \
         lab results and visit notes in one place that you control. It is currently in \
         early access.",
    )
    .with_link("Open MediWallet", "/mediwallet")
    .with_link("Join the waitlist", "/#newsletter")
}

fn reply_booking(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Happy to set that up! You can book a free 30-minute discovery call with our team.",
    )
    .with_link("Book a call", "https://cal.com/veridian-ai/discovery")
    .with_link("Contact form", "/#contact")
}

fn reply_greeting(_: &Utterance) -> ReplyResult {
    ReplyResult::new(
        "Hello! I'm Vera, Veridian AI's assistant. Ask me about our services, the team, \
         MediWallet, or booking a call.",
    )
}

fn reply_thanks(_: &Utterance) -> ReplyResult {
    ReplyResult::new("You're welcome! Let me know if there's anything else I can help with.")
}

/// Reply used when no rule matches.
pub fn fallback_reply() -> ReplyResult {
    ReplyResult::new(
        "I can help you explore our AI consulting services, meet the team, learn about \
         MediWallet, or book a free consultation. What would you like to know?",
    )
    .with_link("Our services", "/#services")
    .with_link("Contact us", "/#contact")
}

// --- tables ---

/// Quoted clients, shared by the testimonials rule and the bare-name rule.
pub const TESTIMONIAL_PEOPLE: &[IntentRule] = &[
    IntentRule {
        name: "testimonial.sandra",
        category: RuleCategory::TestimonialPerson,
        keywords: &["sandra", "clinic"],
        navigate: None,
        respond: reply_sandra,
        nested: &[],
    },
    IntentRule {
        name: "testimonial.michael",
        category: RuleCategory::TestimonialPerson,
        keywords: &["michael", "logistics"],
        navigate: None,
        respond: reply_michael,
        nested: &[],
    },
    IntentRule {
        name: "testimonial.priya",
        category: RuleCategory::TestimonialPerson,
        keywords: &["priya", "retail"],
        navigate: None,
        respond: reply_priya,
        nested: &[],
    },
];

/// The full table in evaluation order.
pub static INTENT_RULES: &[IntentRule] = &[
    IntentRule {
        name: "nav.home",
        category: RuleCategory::Navigation,
        keywords: &["home", "main page", "start page"],
        navigate: Some("/"),
        respond: reply_home,
        nested: &[],
    },
    IntentRule {
        name: "nav.services",
        category: RuleCategory::Navigation,
        keywords: &["service", "offer", "solution"],
        navigate: Some("/#services"),
        respond: reply_services,
        nested: &[],
    },
    IntentRule {
        name: "nav.team",
        category: RuleCategory::Navigation,
        keywords: &["team", "staff", "who works", "people behind"],
        navigate: Some("/#team"),
        respond: reply_team,
        nested: &[],
    },
    IntentRule {
        name: "nav.contact",
        category: RuleCategory::Navigation,
        keywords: &["contact", "email", "phone", "reach out", "get in touch", "address"],
        navigate: Some("/#contact"),
        respond: reply_contact,
        nested: &[],
    },
    IntentRule {
        name: "nav.partners",
        category: RuleCategory::Navigation,
        keywords: &["partner", "collaborat"],
        navigate: Some("/#partners"),
        respond: reply_partners,
        nested: &[],
    },
    IntentRule {
        name: "nav.testimonials",
        category: RuleCategory::Navigation,
        keywords: &["testimonial", "review", "clients say", "client say", "feedback", "success stor"],
        navigate: Some("/#testimonials"),
        respond: reply_testimonials,
        nested: TESTIMONIAL_PEOPLE,
    },
    IntentRule {
        name: "nav.newsletter",
        category: RuleCategory::Navigation,
        keywords: &["newsletter", "subscribe", "mailing list"],
        navigate: Some("/#newsletter"),
        respond: reply_newsletter,
        nested: &[],
    },
    IntentRule {
        name: "identity",
        category: RuleCategory::Identity,
        keywords: &["who are you", "your name", "are you a bot", "are you human", "are you real"],
        navigate: None,
        respond: reply_identity,
        nested: &[],
    },
    IntentRule {
        name: "about",
        category: RuleCategory::Identity,
        keywords: &["about", "company", "mission", "veridian"],
        navigate: None,
        respond: reply_about,
        nested: &[],
    },
    IntentRule {
        name: "person.noopur",
        category: RuleCategory::TeamMember,
        keywords: &["noopur", "founder"],
        navigate: None,
        respond: reply_noopur,
        nested: &[],
    },
    IntentRule {
        name: "person.rahul",
        category: RuleCategory::TeamMember,
        keywords: &["rahul", "technology officer", "tech lead"],
        navigate: None,
        respond: reply_rahul,
        nested: &[],
    },
    // A quoted client asked about by name, without "testimonial". Role words
    // ("clinic", "retail") only disambiguate once testimonials were asked for.
    IntentRule {
        name: "testimonial.person",
        category: RuleCategory::TestimonialPerson,
        keywords: &["sandra", "michael", "priya"],
        navigate: Some("/#testimonials"),
        respond: reply_testimonials,
        nested: TESTIMONIAL_PEOPLE,
    },
    IntentRule {
        name: "product.mediwallet",
        category: RuleCategory::Product,
        keywords: &["mediwallet", "medi wallet", "health record", "medical record"],
        navigate: None,
        respond: reply_mediwallet,
        nested: &[],
    },
    IntentRule {
        name: "booking",
        category: RuleCategory::Booking,
        keywords: &["book", "demo", "schedule", "appointment", "consultation", "call"],
        navigate: None,
        respond: reply_booking,
        nested: &[],
    },
    IntentRule {
        name: "greeting",
        category: RuleCategory::Greeting,
        keywords: &["hello", "hi", "hey", "good morning", "good afternoon", "good evening", "greetings"],
        navigate: None,
        respond: reply_greeting,
        nested: &[],
    },
    IntentRule {
        name: "thanks",
        category: RuleCategory::Thanks,
        keywords: &["thank", "thx", "appreciate", "cheers"],
        navigate: None,
        respond: reply_thanks,
        nested: &[],
    },
];
