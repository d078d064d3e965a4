//! Static FAQ knowledge base and its search filter.
//!
//! The FAQ list is fixed at compile time; search is a case-insensitive
//! substring test over question, answer, and tags, optionally narrowed
//! by category. Results keep the input order.

use crate::types::Faq;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// The built-in FAQ entries, in display order.
pub const FAQ_DATA: &[Faq] = &[
    Faq {
        id: "1",
        category: "Account",
        question: "How do I reset my password?",
        answer: "To reset your password: 1) Go to the login page, 2) Click \"Forgot \
                 Password\", 3) Enter your email address, 4) Check your email for reset \
                 instructions, 5) Follow the link to create a new password.",
        tags: &["password", "account", "login"],
    },
    Faq {
        id: "2",
        category: "Billing",
        question: "When will I be charged?",
        answer: "You will be charged on the same date each month as your initial \
                 subscription. For example, if you subscribed on the 15th, you'll be \
                 charged on the 15th of each month.",
        tags: &["billing", "subscription", "payment"],
    },
    Faq {
        id: "3",
        category: "Orders",
        question: "How can I track my order?",
        answer: "You can track your order by: 1) Logging into your account, 2) Going to \
                 \"My Orders\", 3) Clicking on the order number, 4) Viewing the tracking \
                 information and estimated delivery date.",
        tags: &["orders", "shipping", "tracking"],
    },
    Faq {
        id: "4",
        category: "Technical",
        question: "The app is running slowly. What should I do?",
        answer: "Try these troubleshooting steps: 1) Clear your browser cache, 2) Disable \
                 browser extensions, 3) Check your internet connection, 4) Try using a \
                 different browser, 5) Restart your device if the issue persists.",
        tags: &["technical", "performance", "troubleshooting"],
    },
    Faq {
        id: "5",
        category: "Returns",
        question: "What is your return policy?",
        answer: "We offer a 30-day return policy. Items must be unused and in original \
                 packaging. To initiate a return: 1) Contact customer support, 2) Receive \
                 return authorization, 3) Ship item back using provided label, 4) Refund \
                 processed within 5-7 business days.",
        tags: &["returns", "refund", "policy"],
    },
];

/// Filter FAQs by free-text query and category.
///
/// An FAQ is kept when the query (empty matches everything) appears in
/// its question, answer, or any tag, case-insensitively, AND the
/// category is [`ALL_CATEGORIES`] or equals the FAQ's category. Pure;
/// output order is input order.
pub fn filter_faqs<'a>(all: &'a [Faq], query: &str, category: &str) -> Vec<&'a Faq> {
    let query = query.to_lowercase();

    all.iter()
        .filter(|faq| {
            let matches_query = query.is_empty()
                || faq.question.to_lowercase().contains(&query)
                || faq.answer.to_lowercase().contains(&query)
                || faq.tags.iter().any(|tag| tag.to_lowercase().contains(&query));
            let matches_category = category == ALL_CATEGORIES || faq.category == category;
            matches_query && matches_category
        })
        .collect()
}

/// Category filter values: "all" followed by each distinct category in
/// first-seen order.
pub fn categories(all: &[Faq]) -> Vec<&str> {
    let mut out = vec![ALL_CATEGORIES];
    for faq in all {
        if !out.contains(&faq.category) {
            out.push(faq.category);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_all_categories_is_identity() {
        let result = filter_faqs(FAQ_DATA, "", ALL_CATEGORIES);
        assert_eq!(result.len(), FAQ_DATA.len());
        let ids: Vec<_> = result.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn test_query_matches_tags() {
        let result = filter_faqs(FAQ_DATA, "password", ALL_CATEGORIES);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].question, "How do I reset my password?");
    }

    #[test]
    fn test_query_matches_answer_text() {
        // "browser cache" only appears in the technical answer
        let result = filter_faqs(FAQ_DATA, "browser cache", ALL_CATEGORIES);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Technical");
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let lower = filter_faqs(FAQ_DATA, "password", ALL_CATEGORIES);
        let upper = filter_faqs(FAQ_DATA, "PASSWORD", ALL_CATEGORIES);
        assert_eq!(lower.len(), upper.len());
    }

    #[test]
    fn test_category_filter() {
        let result = filter_faqs(FAQ_DATA, "", "Billing");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "2");

        // Query and category must both match
        let result = filter_faqs(FAQ_DATA, "password", "Billing");
        assert!(result.is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        assert!(filter_faqs(FAQ_DATA, "quantum entanglement", ALL_CATEGORIES).is_empty());
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let cats = categories(FAQ_DATA);
        assert_eq!(
            cats,
            vec!["all", "Account", "Billing", "Orders", "Technical", "Returns"]
        );
    }
}
