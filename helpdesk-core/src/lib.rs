//! # helpdesk-core
//!
//! Core library for helpdesk - a terminal customer-support demo.
//!
//! This library provides:
//! - Domain types for messages, tickets, FAQs, and metrics
//! - The keyword response router behind the scripted assistant
//! - The chat session state machine (timers, escalation, resolution)
//! - Configuration management and logging infrastructure
//!
//! ## Architecture
//!
//! Everything is in-memory and single-session: the router is a pure
//! function over a fixed rule table, and [`ChatSession`] owns all
//! mutable state. Simulated delays are due-timestamps drained by
//! [`ChatSession::tick`], so the caller (TUI loop or test) supplies the
//! clock.
//!
//! ## Example
//!
//! ```rust
//! use helpdesk_core::{ChatConfig, ChatSession};
//!
//! let now = chrono::Utc::now();
//! let mut session = ChatSession::new(&ChatConfig::default(), now);
//!
//! session.submit("I need to track my order", now);
//! let events = session.tick(now + chrono::Duration::seconds(2));
//! assert!(!events.is_empty());
//! ```

// Re-export commonly used items at the crate root
pub use config::{ChatConfig, Config};
pub use error::{Error, Result};
pub use router::{classify, Classification, ResponseCategory};
pub use session::{ChatSession, SessionEvent, SessionState};
pub use types::*;

// Public modules
pub mod config;
pub mod error;
pub mod format;
pub mod knowledge;
pub mod logging;
pub mod router;
pub mod session;
pub mod types;
