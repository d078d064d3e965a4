//! Core domain types for helpdesk
//!
//! These types model a single in-memory support session: the chat
//! transcript, the tickets raised by escalation, the static FAQ
//! knowledge base, and the metrics snapshot shown on the dashboard.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Utterance** | A single free-text message submitted by the customer |
//! | **Canned response** | One of a fixed small set of predetermined reply strings |
//! | **Escalation** | Creating a Ticket and routing the conversation to human handling |
//! | **Ticket** | A record representing an escalated support case awaiting resolution |
//!
//! Nothing here persists: a session lives for the life of the process
//! and is rebuilt from scratch on restart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================
// Messages
// ============================================

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// The customer typing into the chat
    User,
    /// The scripted assistant
    Assistant,
    /// Session-generated notices (ticket seeds, etc.)
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            _ => Err(format!("unknown message role: {}", s)),
        }
    }
}

/// A single chat message.
///
/// Immutable once created; the session appends messages in display
/// order and never rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier
    pub id: String,
    /// Who authored this message
    pub role: MessageRole,
    /// Text content
    pub content: String,
    /// When the message was appended
    pub timestamp: DateTime<Utc>,
    /// Routing category for assistant replies (if classified)
    pub category: Option<String>,
}

impl Message {
    fn new(role: MessageRole, content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: now,
            category: None,
        }
    }

    pub fn user(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(MessageRole::User, content, now)
    }

    pub fn assistant(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(MessageRole::Assistant, content, now)
    }

    pub fn system(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::new(MessageRole::System, content, now)
    }

    /// Attach a routing category (used on assistant replies).
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

// ============================================
// Tickets
// ============================================

/// Priority assigned to a ticket at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TicketPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketPriority::Low => "low",
            TicketPriority::Medium => "medium",
            TicketPriority::High => "high",
            TicketPriority::Urgent => "urgent",
        }
    }
}

impl std::str::FromStr for TicketPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(TicketPriority::Low),
            "medium" => Ok(TicketPriority::Medium),
            "high" => Ok(TicketPriority::High),
            "urgent" => Ok(TicketPriority::Urgent),
            _ => Err(format!("unknown ticket priority: {}", s)),
        }
    }
}

/// Lifecycle state of a ticket.
///
/// In this demo the only transition that actually occurs is
/// `Escalated -> Resolved`; the other variants exist so the data model
/// matches a real ticketing system's vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Escalated,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in-progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Escalated => "escalated",
        }
    }
}

impl std::str::FromStr for TicketStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(TicketStatus::Open),
            "in-progress" => Ok(TicketStatus::InProgress),
            "resolved" => Ok(TicketStatus::Resolved),
            "escalated" => Ok(TicketStatus::Escalated),
            _ => Err(format!("unknown ticket status: {}", s)),
        }
    }
}

/// An escalated support case.
///
/// Created exactly once, at the moment the router signals escalation,
/// seeded with a single system message describing the reason. The
/// conversation snapshot is copied at creation time and does not track
/// later chat activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique identifier
    pub id: String,
    /// Synthetic customer identifier for display
    pub customer_id: String,
    /// Escalation reason, shown as the ticket subject
    pub subject: String,
    /// Priority assigned at creation
    pub priority: TicketPriority,
    /// Current lifecycle state
    pub status: TicketStatus,
    /// Conversation snapshot (seed system message first)
    pub messages: Vec<Message>,
    /// When the ticket was created
    pub created_at: DateTime<Utc>,
    /// Set iff status is Resolved
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Create an escalated ticket seeded with its system message.
    pub fn escalated(
        subject: impl Into<String>,
        transcript: &[Message],
        now: DateTime<Utc>,
    ) -> Self {
        let subject = subject.into();
        let seed = Message::system(format!("Ticket escalated: {}", subject), now);

        let mut messages = vec![seed];
        messages.extend_from_slice(transcript);

        Self {
            id: format!("ticket-{}", Uuid::new_v4()),
            customer_id: customer_id(),
            subject,
            priority: TicketPriority::High,
            status: TicketStatus::Escalated,
            messages,
            created_at: now,
            resolved_at: None,
        }
    }

    /// Mark the ticket resolved. Idempotent: resolving an already
    /// resolved ticket keeps the original resolution time.
    pub fn resolve(&mut self, now: DateTime<Utc>) {
        if self.status == TicketStatus::Resolved {
            return;
        }
        self.status = TicketStatus::Resolved;
        self.resolved_at = Some(now);
    }

    pub fn is_resolved(&self) -> bool {
        self.status == TicketStatus::Resolved
    }
}

/// Synthesize a display-only customer id.
fn customer_id() -> String {
    let uuid = Uuid::new_v4();
    format!("customer-{}", &uuid.to_string()[..8])
}

// ============================================
// Knowledge Base
// ============================================

/// A read-only FAQ entry. Never mutated after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Faq {
    /// Unique identifier
    pub id: &'static str,
    /// Category label for filtering
    pub category: &'static str,
    /// The question as shown in the list
    pub question: &'static str,
    /// The expanded answer text
    pub answer: &'static str,
    /// Search tags
    pub tags: &'static [&'static str],
}

// ============================================
// Metrics (static snapshot)
// ============================================

/// Aggregate support metrics for the dashboard.
///
/// A fixed snapshot in this demo; nothing recomputes these from live
/// session data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SupportMetrics {
    /// Total queries handled
    pub total_queries: u32,
    /// Queries resolved without escalation
    pub resolved_queries: u32,
    /// Average response time in seconds
    pub average_response_time: f64,
    /// Customer satisfaction percentage
    pub customer_satisfaction_rate: f64,
    /// Share of queries escalated, percentage
    pub escalation_rate: f64,
}

impl SupportMetrics {
    /// The snapshot shown on the dashboard.
    pub fn snapshot() -> Self {
        Self {
            total_queries: 1247,
            resolved_queries: 1184,
            average_response_time: 2.3,
            customer_satisfaction_rate: 94.8,
            escalation_rate: 5.1,
        }
    }

    /// Resolution rate as a percentage of total queries.
    pub fn resolution_rate(&self) -> f64 {
        if self.total_queries == 0 {
            return 0.0;
        }
        (self.resolved_queries as f64 / self.total_queries as f64) * 100.0
    }
}

impl Default for SupportMetrics {
    fn default() -> Self {
        Self::snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_resolve_is_idempotent() {
        let t0 = Utc::now();
        let mut ticket = Ticket::escalated("Customer requested human agent", &[], t0);
        assert_eq!(ticket.status, TicketStatus::Escalated);
        assert!(ticket.resolved_at.is_none());

        let t1 = t0 + chrono::Duration::seconds(30);
        ticket.resolve(t1);
        assert_eq!(ticket.status, TicketStatus::Resolved);
        assert_eq!(ticket.resolved_at, Some(t1));

        // Resolving again keeps the original timestamp
        let t2 = t1 + chrono::Duration::seconds(30);
        ticket.resolve(t2);
        assert_eq!(ticket.resolved_at, Some(t1));
    }

    #[test]
    fn test_escalated_ticket_has_system_seed() {
        let now = Utc::now();
        let transcript = vec![Message::user("I want a manager", now)];
        let ticket = Ticket::escalated("Customer requested human agent", &transcript, now);

        assert_eq!(ticket.priority, TicketPriority::High);
        assert_eq!(ticket.messages.len(), 2);
        assert_eq!(ticket.messages[0].role, MessageRole::System);
        assert!(ticket.messages[0].content.contains("escalated"));
        assert_eq!(ticket.messages[1].role, MessageRole::User);
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TicketStatus::Open,
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Escalated,
        ] {
            let parsed: TicketStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_resolution_rate() {
        let metrics = SupportMetrics::snapshot();
        let rate = metrics.resolution_rate();
        assert!((rate - 94.9).abs() < 0.1);

        let empty = SupportMetrics {
            total_queries: 0,
            resolved_queries: 0,
            ..SupportMetrics::snapshot()
        };
        assert_eq!(empty.resolution_rate(), 0.0);
    }
}
