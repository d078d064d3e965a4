//! Keyword routing for the scripted assistant.
//!
//! The "AI" in this demo is an ordered first-match rule list: each rule
//! is a set of substring tests against the lower-cased utterance, and
//! the first satisfied rule picks the canned response. There is no
//! scoring, tokenization, or word-boundary handling; "orders" matches
//! "order" and that is accepted behavior, not a bug.

use serde::Serialize;

/// Routing category attached to a classified reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseCategory {
    OrderStatus,
    Account,
    Billing,
    Technical,
    Refund,
    Escalation,
    General,
}

impl ResponseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseCategory::OrderStatus => "order_status",
            ResponseCategory::Account => "account",
            ResponseCategory::Billing => "billing",
            ResponseCategory::Technical => "technical",
            ResponseCategory::Refund => "refund",
            ResponseCategory::Escalation => "escalation",
            ResponseCategory::General => "general",
        }
    }
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// The canned response text to reply with
    pub response: &'static str,
    /// Which rule category fired
    pub category: ResponseCategory,
    /// True when the reply routes the conversation to a human agent
    pub is_escalation: bool,
}

/// One routing rule: every keyword in `all` must appear, and at least
/// one keyword in `any` (when `any` is non-empty).
#[derive(Debug, Clone, Copy)]
struct Rule {
    all: &'static [&'static str],
    any: &'static [&'static str],
    category: ResponseCategory,
    response: &'static str,
    escalates: bool,
}

impl Rule {
    fn matches(&self, normalized: &str) -> bool {
        self.all.iter().all(|kw| normalized.contains(kw))
            && (self.any.is_empty() || self.any.iter().any(|kw| normalized.contains(kw)))
    }
}

// ============================================
// Canned responses
// ============================================

pub const GREETING: &str = "Hello! I'm here to help you with any questions or concerns \
     you may have. How can I assist you today?";

const ORDER_STATUS: &str = "I'd be happy to help you check your order status. Could you \
     please provide your order number so I can look that up for you?";

const ACCOUNT: &str = "I can help you with account issues. For password resets, please \
     visit our login page and click 'Forgot Password'. If you're having trouble accessing \
     your account, I can guide you through the recovery process.";

const BILLING: &str = "I can help you with billing questions. For your security, I'll \
     need to verify some information. Could you please provide the email address \
     associated with your account?";

const TECHNICAL: &str = "I understand you're experiencing a technical issue. Let me help \
     you troubleshoot this step by step. Can you describe what's happening in more detail?";

const REFUND: &str = "I understand you'd like to discuss a refund or return. Our return \
     policy allows for returns within 30 days. For refund requests, I'll need to escalate \
     this to our billing specialist. Would you like me to do that now?";

const ESCALATION: &str = "I understand this situation requires additional attention. I'm \
     escalating your case to one of our specialist agents who will contact you within 2 \
     hours. Is there anything else I can help you with in the meantime?";

const FALLBACK: &str = "I understand your concern. Let me help you with that. Could you \
     provide a bit more detail about your specific situation so I can give you the most \
     accurate assistance?";

/// The routing table, evaluated top to bottom. Order matters: an
/// utterance mentioning both "order status" and "billing" gets the
/// order-status reply because that rule comes first.
const RULES: &[Rule] = &[
    Rule {
        all: &["order"],
        any: &["status", "track"],
        category: ResponseCategory::OrderStatus,
        response: ORDER_STATUS,
        escalates: false,
    },
    Rule {
        all: &[],
        any: &["password", "login", "account"],
        category: ResponseCategory::Account,
        response: ACCOUNT,
        escalates: false,
    },
    Rule {
        all: &[],
        any: &["billing", "payment", "charge"],
        category: ResponseCategory::Billing,
        response: BILLING,
        escalates: false,
    },
    Rule {
        all: &[],
        any: &["slow", "bug", "error", "technical"],
        category: ResponseCategory::Technical,
        response: TECHNICAL,
        escalates: false,
    },
    Rule {
        all: &[],
        any: &["refund", "return", "cancel"],
        category: ResponseCategory::Refund,
        response: REFUND,
        escalates: false,
    },
    Rule {
        all: &[],
        any: &["escalate", "manager", "human"],
        category: ResponseCategory::Escalation,
        response: ESCALATION,
        escalates: true,
    },
];

/// Classify an utterance against the rule table.
///
/// Pure function: lower-cases the input, walks the rules in order, and
/// returns the first match or the generic fallback. Total over any
/// input; empty-input rejection is the caller's job.
pub fn classify(utterance: &str) -> Classification {
    let normalized = utterance.to_lowercase();

    for rule in RULES {
        if rule.matches(&normalized) {
            return Classification {
                response: rule.response,
                category: rule.category,
                is_escalation: rule.escalates,
            };
        }
    }

    Classification {
        response: FALLBACK,
        category: ResponseCategory::General,
        is_escalation: false,
    }
}
