//! End-to-end tests for the support session flow.
//!
//! These drive a session through the public API only, the same way the
//! TUI does: submit input, advance a fake clock, observe the transcript
//! and ticket collection.

use chrono::{DateTime, Duration, Utc};
use helpdesk_core::knowledge::{self, ALL_CATEGORIES, FAQ_DATA};
use helpdesk_core::{
    ChatConfig, ChatSession, MessageRole, SessionEvent, SupportMetrics, TicketStatus,
};

fn start() -> (ChatSession, DateTime<Utc>) {
    helpdesk_core::logging::init_test();
    let now = Utc::now();
    (ChatSession::new(&ChatConfig::default(), now), now)
}

#[test]
fn test_manager_request_escalates_end_to_end() {
    let (mut session, t0) = start();

    assert!(session.submit("I want to talk to a manager", t0));

    // The assistant replies with the escalation text after the typing delay
    let events = session.tick(t0 + Duration::milliseconds(1500));
    assert_eq!(events, vec![SessionEvent::Replied { is_escalation: true }]);

    let reply = session.messages().last().unwrap();
    assert_eq!(reply.role, MessageRole::Assistant);
    assert!(reply.content.contains("escalating your case"));
    assert_eq!(reply.category.as_deref(), Some("escalation"));

    // After the follow-up delay a ticket appears
    let events = session.tick(t0 + Duration::milliseconds(2500));
    assert!(matches!(events[0], SessionEvent::Escalated { .. }));

    let ticket = &session.tickets()[0];
    assert_eq!(ticket.status, TicketStatus::Escalated);
    assert_eq!(ticket.subject, "Customer requested human agent");

    // Seed system message describes the escalation
    assert_eq!(ticket.messages[0].role, MessageRole::System);
    assert!(ticket.messages[0].content.contains("escalated"));

    // Snapshot carries the conversation up to the escalation
    assert!(ticket
        .messages
        .iter()
        .any(|m| m.role == MessageRole::User && m.content.contains("manager")));
}

#[test]
fn test_ordinary_question_never_creates_a_ticket() {
    let (mut session, t0) = start();

    session.submit("when will I be charged?", t0);
    let events = session.tick(t0 + Duration::seconds(10));

    assert_eq!(events, vec![SessionEvent::Replied { is_escalation: false }]);
    assert!(session.tickets().is_empty());

    let reply = session.messages().last().unwrap();
    assert_eq!(reply.category.as_deref(), Some("billing"));
}

#[test]
fn test_escalate_then_resolve_round_trip() {
    let (mut session, t0) = start();

    session.submit("escalate this please", t0);
    session.tick(t0 + Duration::seconds(5));
    assert_eq!(session.unresolved_ticket_count(), 1);

    let ticket_id = session.tickets()[0].id.clone();
    session.resolve_ticket(&ticket_id, t0 + Duration::minutes(3));

    let ticket = &session.tickets()[0];
    assert_eq!(ticket.status, TicketStatus::Resolved);
    assert!(ticket.resolved_at.is_some());
    assert_eq!(session.unresolved_ticket_count(), 0);
}

#[test]
fn test_multiple_escalations_create_independent_tickets() {
    let (mut session, mut now) = start();

    for _ in 0..2 {
        session.submit("get me a human", now);
        session.tick(now + Duration::seconds(5));
        now = now + Duration::seconds(10);
    }

    assert_eq!(session.tickets().len(), 2);
    assert_ne!(session.tickets()[0].id, session.tickets()[1].id);

    // Resolving the first leaves the second escalated
    let first_id = session.tickets()[0].id.clone();
    session.resolve_ticket(&first_id, now);
    assert_eq!(session.tickets()[0].status, TicketStatus::Resolved);
    assert_eq!(session.tickets()[1].status, TicketStatus::Escalated);
}

#[test]
fn test_knowledge_base_search_matches_router_domains() {
    // Every routed topic has FAQ coverage a customer could be pointed at
    for (query, expected_category) in [
        ("password", "Account"),
        ("tracking", "Orders"),
        ("payment", "Billing"),
        ("troubleshooting", "Technical"),
        ("refund", "Returns"),
    ] {
        let hits = knowledge::filter_faqs(FAQ_DATA, query, ALL_CATEGORIES);
        assert!(
            hits.iter().any(|f| f.category == expected_category),
            "query {:?} should surface a {} FAQ",
            query,
            expected_category
        );
    }
}

#[test]
fn test_metrics_snapshot_is_consistent() {
    let metrics = SupportMetrics::snapshot();
    assert!(metrics.resolved_queries <= metrics.total_queries);
    assert!(metrics.resolution_rate() > 90.0);
    assert!(metrics.escalation_rate < 10.0);
}
