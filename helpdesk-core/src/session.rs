//! Chat session state machine.
//!
//! A [`ChatSession`] owns everything that changes during a
//! conversation: the transcript, the ticket list, and the timers that
//! simulate the assistant thinking. Timers are plain due-timestamps
//! drained by [`ChatSession::tick`], so the caller decides the clock;
//! the TUI ticks with `Utc::now()` on every poll, tests tick with
//! whatever instants they like and never sleep.
//!
//! Queued timers are fire-and-forget: nothing cancels or de-duplicates
//! them, so overlapping submissions each produce their own reply. The
//! UI layer serializes by refusing input while a reply is pending, but
//! the core does not enforce that.

use chrono::{DateTime, Duration, Utc};

use crate::config::ChatConfig;
use crate::router::{self, Classification};
use crate::types::{Message, Ticket};

/// Reason recorded on tickets created from an in-chat escalation.
const ESCALATION_REASON: &str = "Customer requested human agent";

/// Where the conversation loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Ready for customer input
    #[default]
    Idle,
    /// A reply timer is pending; the UI shows the typing indicator
    AwaitingResponse,
}

/// A timed event queued by the session.
#[derive(Debug, Clone)]
enum PendingEvent {
    /// Classify `utterance` and append the assistant reply at `due`.
    Reply {
        due: DateTime<Utc>,
        utterance: String,
    },
    /// Create the escalation ticket at `due`.
    Escalation {
        due: DateTime<Utc>,
        reason: String,
    },
}

impl PendingEvent {
    fn due(&self) -> DateTime<Utc> {
        match self {
            PendingEvent::Reply { due, .. } => *due,
            PendingEvent::Escalation { due, .. } => *due,
        }
    }
}

/// Something observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// An assistant reply was appended
    Replied { is_escalation: bool },
    /// A ticket was created; the UI should switch to the escalation view
    Escalated { ticket_id: String },
}

/// All mutable state for one support conversation.
///
/// Everything is in memory and owned here; there is no persistence and
/// no sharing across sessions.
pub struct ChatSession {
    messages: Vec<Message>,
    tickets: Vec<Ticket>,
    state: SessionState,
    pending: Vec<PendingEvent>,
    response_delay: Duration,
    escalation_delay: Duration,
}

impl ChatSession {
    /// Create a session opened with the canned greeting.
    pub fn new(config: &ChatConfig, now: DateTime<Utc>) -> Self {
        Self {
            messages: vec![Message::assistant(router::GREETING, now)],
            tickets: Vec::new(),
            state: SessionState::default(),
            pending: Vec::new(),
            response_delay: Duration::milliseconds(config.response_delay_ms as i64),
            escalation_delay: Duration::milliseconds(config.escalation_delay_ms as i64),
        }
    }

    /// Submit customer input.
    ///
    /// Whitespace-only input is rejected here, before it reaches the
    /// router. Returns false for rejected input, true when a user
    /// message was appended and a reply timer queued.
    pub fn submit(&mut self, input: &str, now: DateTime<Utc>) -> bool {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return false;
        }

        tracing::debug!(len = trimmed.len(), "customer message submitted");

        self.messages.push(Message::user(trimmed, now));
        self.pending.push(PendingEvent::Reply {
            due: now + self.response_delay,
            utterance: trimmed.to_string(),
        });
        self.state = SessionState::AwaitingResponse;
        true
    }

    /// Advance the session clock, firing every timer that has come due.
    ///
    /// Events fire in due order. Returns what happened so the caller
    /// can react (scroll the chat, switch to the escalation view).
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<SessionEvent> {
        let mut fired = Vec::new();

        loop {
            // Earliest due event, if any is ready.
            let next = self
                .pending
                .iter()
                .enumerate()
                .filter(|(_, ev)| ev.due() <= now)
                .min_by_key(|(_, ev)| ev.due())
                .map(|(idx, _)| idx);

            let Some(idx) = next else { break };

            match self.pending.remove(idx) {
                PendingEvent::Reply { utterance, .. } => {
                    let event = self.deliver_reply(&utterance, now);
                    fired.push(event);
                }
                PendingEvent::Escalation { reason, .. } => {
                    let event = self.create_ticket(&reason, now);
                    fired.push(event);
                }
            }
        }

        fired
    }

    /// Classify and append the assistant reply, queuing the escalation
    /// ticket timer when the escalation rule fired.
    fn deliver_reply(&mut self, utterance: &str, now: DateTime<Utc>) -> SessionEvent {
        let Classification {
            response,
            category,
            is_escalation,
        } = router::classify(utterance);

        tracing::debug!(category = category.as_str(), is_escalation, "reply classified");

        self.messages
            .push(Message::assistant(response, now).with_category(category.as_str()));

        // Back to Idle unless another reply is still queued (overlapping
        // submissions are allowed by the core).
        if !self
            .pending
            .iter()
            .any(|ev| matches!(ev, PendingEvent::Reply { .. }))
        {
            self.state = SessionState::Idle;
        }

        if is_escalation {
            self.pending.push(PendingEvent::Escalation {
                due: now + self.escalation_delay,
                reason: ESCALATION_REASON.to_string(),
            });
        }

        SessionEvent::Replied { is_escalation }
    }

    /// Create the escalation ticket with the conversation snapshot.
    fn create_ticket(&mut self, reason: &str, now: DateTime<Utc>) -> SessionEvent {
        let ticket = Ticket::escalated(reason, &self.messages, now);
        let ticket_id = ticket.id.clone();

        tracing::info!(ticket_id = %ticket_id, reason, "ticket escalated");

        self.tickets.push(ticket);
        SessionEvent::Escalated { ticket_id }
    }

    /// Resolve a ticket by id. Unknown ids are a silent no-op; the
    /// lookup is local and there is nothing to recover from.
    pub fn resolve_ticket(&mut self, ticket_id: &str, now: DateTime<Utc>) {
        match self.tickets.iter_mut().find(|t| t.id == ticket_id) {
            Some(ticket) => {
                ticket.resolve(now);
                tracing::info!(ticket_id, "ticket resolved");
            }
            None => {
                tracing::debug!(ticket_id, "resolve requested for unknown ticket");
            }
        }
    }

    /// True while a reply timer is outstanding.
    pub fn is_awaiting_response(&self) -> bool {
        self.state == SessionState::AwaitingResponse
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Transcript in display order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All tickets, oldest first.
    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    /// Tickets still awaiting a human (for the tab badge).
    pub fn unresolved_ticket_count(&self) -> usize {
        self.tickets.iter().filter(|t| !t.is_resolved()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageRole, TicketStatus};

    fn session() -> (ChatSession, DateTime<Utc>) {
        let now = Utc::now();
        (ChatSession::new(&ChatConfig::default(), now), now)
    }

    fn ms(n: i64) -> Duration {
        Duration::milliseconds(n)
    }

    #[test]
    fn test_session_opens_with_greeting() {
        let (session, _) = session();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].role, MessageRole::Assistant);
        assert!(session.messages()[0].content.starts_with("Hello!"));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_blank_submit_is_rejected() {
        let (mut session, now) = session();
        assert!(!session.submit("", now));
        assert!(!session.submit("   \t ", now));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_submit_enters_awaiting_response() {
        let (mut session, now) = session();
        assert!(session.submit("where is my order? track it", now));
        assert!(session.is_awaiting_response());

        // User message appended, reply not yet delivered
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[1].role, MessageRole::User);

        // Before the delay elapses nothing fires
        assert!(session.tick(now + ms(100)).is_empty());
        assert!(session.is_awaiting_response());
    }

    #[test]
    fn test_reply_delivered_after_delay() {
        let (mut session, now) = session();
        session.submit("track my order status", now);

        let events = session.tick(now + ms(1500));
        assert_eq!(events, vec![SessionEvent::Replied { is_escalation: false }]);
        assert_eq!(session.state(), SessionState::Idle);

        let reply = session.messages().last().unwrap();
        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.category.as_deref(), Some("order_status"));
        assert!(reply.content.contains("order status"));
    }

    #[test]
    fn test_escalation_creates_ticket_after_second_delay() {
        let (mut session, now) = session();
        session.submit("I want to talk to a manager", now);

        // Reply fires at +1500ms, flags escalation
        let events = session.tick(now + ms(1500));
        assert_eq!(events, vec![SessionEvent::Replied { is_escalation: true }]);
        assert!(session.tickets().is_empty());

        // Ticket fires after the additional 1000ms delay
        let events = session.tick(now + ms(2500));
        assert_eq!(events.len(), 1);
        let SessionEvent::Escalated { ticket_id } = &events[0] else {
            panic!("expected escalation event");
        };

        let ticket = &session.tickets()[0];
        assert_eq!(&ticket.id, ticket_id);
        assert_eq!(ticket.status, TicketStatus::Escalated);
        assert_eq!(ticket.subject, "Customer requested human agent");
        assert_eq!(ticket.messages[0].role, MessageRole::System);
        assert!(ticket.messages[0].content.contains("escalated"));
    }

    #[test]
    fn test_one_tick_drains_all_due_events_in_order() {
        let (mut session, now) = session();
        session.submit("get me a human", now);

        // A single late tick fires the reply and then the ticket.
        let events = session.tick(now + ms(10_000));
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], SessionEvent::Replied { is_escalation: true });
        assert!(matches!(events[1], SessionEvent::Escalated { .. }));
        assert_eq!(session.unresolved_ticket_count(), 1);
    }

    #[test]
    fn test_overlapping_submissions_each_get_a_reply() {
        let (mut session, now) = session();
        session.submit("billing question", now);
        session.submit("also my app is slow", now + ms(200));

        // Still awaiting after the first reply lands
        let events = session.tick(now + ms(1500));
        assert_eq!(events.len(), 1);
        assert!(session.is_awaiting_response());

        let events = session.tick(now + ms(1700));
        assert_eq!(events.len(), 1);
        assert_eq!(session.state(), SessionState::Idle);

        // Greeting + 2 user + 2 assistant
        assert_eq!(session.messages().len(), 5);
        let categories: Vec<_> = session
            .messages()
            .iter()
            .filter_map(|m| m.category.as_deref())
            .collect();
        assert_eq!(categories, vec!["billing", "technical"]);
    }

    #[test]
    fn test_resolve_unknown_ticket_is_noop() {
        let (mut session, now) = session();
        session.resolve_ticket("ticket-does-not-exist", now);
        assert!(session.tickets().is_empty());
    }

    #[test]
    fn test_resolve_ticket_sets_resolved_at() {
        let (mut session, now) = session();
        session.submit("escalate", now);
        session.tick(now + ms(5000));

        let ticket_id = session.tickets()[0].id.clone();
        let resolve_at = now + ms(60_000);
        session.resolve_ticket(&ticket_id, resolve_at);

        let ticket = &session.tickets()[0];
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.resolved_at, Some(resolve_at));
        assert_eq!(session.unresolved_ticket_count(), 0);

        // Second resolve is idempotent
        session.resolve_ticket(&ticket_id, resolve_at + ms(1000));
        assert_eq!(session.tickets()[0].resolved_at, Some(resolve_at));
    }
}
