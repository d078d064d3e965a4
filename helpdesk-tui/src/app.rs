//! Application state for the TUI.

use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use helpdesk_core::knowledge::{self, FAQ_DATA};
use helpdesk_core::{ChatSession, Config, SessionEvent, SupportMetrics};
use ratatui::widgets::TableState;

/// Which tab is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveTab {
    /// Live chat with the scripted assistant
    #[default]
    Chat,
    /// Searchable FAQ list
    Knowledge,
    /// Escalated tickets
    Escalations,
    /// Static metrics dashboard
    Metrics,
}

impl ActiveTab {
    pub fn label(&self) -> &'static str {
        match self {
            ActiveTab::Chat => "Live Chat",
            ActiveTab::Knowledge => "Knowledge Base",
            ActiveTab::Escalations => "Escalations",
            ActiveTab::Metrics => "Metrics",
        }
    }

    pub fn all() -> [ActiveTab; 4] {
        [
            ActiveTab::Chat,
            ActiveTab::Knowledge,
            ActiveTab::Escalations,
            ActiveTab::Metrics,
        ]
    }

    fn next(self) -> Self {
        match self {
            ActiveTab::Chat => ActiveTab::Knowledge,
            ActiveTab::Knowledge => ActiveTab::Escalations,
            ActiveTab::Escalations => ActiveTab::Metrics,
            ActiveTab::Metrics => ActiveTab::Chat,
        }
    }

    fn prev(self) -> Self {
        match self {
            ActiveTab::Chat => ActiveTab::Metrics,
            ActiveTab::Knowledge => ActiveTab::Chat,
            ActiveTab::Escalations => ActiveTab::Knowledge,
            ActiveTab::Metrics => ActiveTab::Escalations,
        }
    }
}

/// Main application state.
pub struct App {
    /// The chat session (owns transcript, tickets, timers)
    pub session: ChatSession,
    /// Currently visible tab
    pub active_tab: ActiveTab,

    // Chat view
    /// Input buffer for the chat line
    pub input: String,
    /// Scroll offset for the transcript
    pub chat_scroll: usize,
    /// Pin the view to the newest message until the user scrolls up
    pub follow_chat: bool,

    // Knowledge view
    /// Search query for the FAQ filter
    pub search: String,
    /// Index into `categories()` for the active category chip
    pub category_index: usize,
    /// FAQ table selection
    pub faq_state: TableState,
    /// Id of the FAQ expanded to show its answer, if any
    pub expanded_faq: Option<&'static str>,

    // Escalations view
    /// Ticket table selection
    pub ticket_state: TableState,
    /// Whether the conversation snapshot panel is open
    pub show_ticket_detail: bool,

    // Metrics view
    /// Static dashboard snapshot
    pub metrics: SupportMetrics,

    /// Whether the app should exit
    pub should_quit: bool,
}

impl App {
    /// Create the app with a fresh session.
    pub fn new(config: &Config, now: DateTime<Utc>) -> Self {
        Self {
            session: ChatSession::new(&config.chat, now),
            active_tab: ActiveTab::default(),
            input: String::new(),
            chat_scroll: 0,
            follow_chat: true,
            search: String::new(),
            category_index: 0,
            faq_state: TableState::default(),
            expanded_faq: None,
            ticket_state: TableState::default(),
            show_ticket_detail: false,
            metrics: SupportMetrics::snapshot(),
            should_quit: false,
        }
    }

    /// Advance session timers (call once per poll iteration).
    ///
    /// An escalation pulls the user into the Escalations tab, matching
    /// the original app's behavior.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        for event in self.session.tick(now) {
            match event {
                SessionEvent::Replied { .. } => {
                    self.follow_chat = true;
                }
                SessionEvent::Escalated { .. } => {
                    self.active_tab = ActiveTab::Escalations;
                    let last = self.session.tickets().len().saturating_sub(1);
                    self.ticket_state.select(Some(last));
                }
            }
        }
    }

    /// The category chip currently selected in the knowledge view.
    pub fn selected_category(&self) -> &'static str {
        let cats = knowledge::categories(FAQ_DATA);
        cats.get(self.category_index).copied().unwrap_or("all")
    }

    /// FAQs matching the current search and category.
    pub fn filtered_faqs(&self) -> Vec<&'static helpdesk_core::Faq> {
        knowledge::filter_faqs(FAQ_DATA, &self.search, self.selected_category())
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        // Global bindings first
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }
        match key.code {
            KeyCode::Esc => {
                // Esc closes an open detail panel before quitting
                if self.active_tab == ActiveTab::Escalations && self.show_ticket_detail {
                    self.show_ticket_detail = false;
                } else if self.active_tab == ActiveTab::Knowledge && self.expanded_faq.is_some() {
                    self.expanded_faq = None;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::Tab => {
                self.active_tab = self.active_tab.next();
                return;
            }
            KeyCode::BackTab => {
                self.active_tab = self.active_tab.prev();
                return;
            }
            _ => {}
        }

        match self.active_tab {
            ActiveTab::Chat => self.handle_chat_key(key, now),
            ActiveTab::Knowledge => self.handle_knowledge_key(key),
            ActiveTab::Escalations => self.handle_escalations_key(key, now),
            ActiveTab::Metrics => self.handle_metrics_key(key),
        }
    }

    /// Keyboard input for the chat tab.
    ///
    /// Input is disabled while a reply is pending: submissions are
    /// serialized at this layer even though the session core would
    /// accept overlapping sends.
    fn handle_chat_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        match key.code {
            KeyCode::Enter => {
                if !self.session.is_awaiting_response() && self.session.submit(&self.input, now) {
                    self.input.clear();
                    self.follow_chat = true;
                }
            }
            KeyCode::Char(c) => {
                if !self.session.is_awaiting_response() {
                    self.input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => {
                self.chat_scroll = self.chat_scroll.saturating_sub(1);
                self.follow_chat = false;
            }
            KeyCode::Down => {
                self.chat_scroll = self.chat_scroll.saturating_add(1);
            }
            KeyCode::PageUp => {
                self.chat_scroll = self.chat_scroll.saturating_sub(10);
                self.follow_chat = false;
            }
            KeyCode::PageDown => {
                self.chat_scroll = self.chat_scroll.saturating_add(10);
            }
            KeyCode::End => {
                self.follow_chat = true;
            }
            _ => {}
        }
    }

    /// Keyboard input for the knowledge base tab.
    fn handle_knowledge_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                self.search.push(c);
                self.clamp_faq_selection();
            }
            KeyCode::Backspace => {
                self.search.pop();
                self.clamp_faq_selection();
            }
            KeyCode::Left => {
                let count = knowledge::categories(FAQ_DATA).len();
                self.category_index = (self.category_index + count - 1) % count;
                self.clamp_faq_selection();
            }
            KeyCode::Right => {
                let count = knowledge::categories(FAQ_DATA).len();
                self.category_index = (self.category_index + 1) % count;
                self.clamp_faq_selection();
            }
            KeyCode::Down => self.select_next_faq(),
            KeyCode::Up => self.select_previous_faq(),
            KeyCode::Enter => self.toggle_faq(),
            _ => {}
        }
    }

    /// Keyboard input for the escalations tab.
    fn handle_escalations_key(&mut self, key: KeyEvent, now: DateTime<Utc>) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Down | KeyCode::Char('j') => self.select_next_ticket(),
            KeyCode::Up | KeyCode::Char('k') => self.select_previous_ticket(),
            KeyCode::Enter => {
                if self.ticket_state.selected().is_some() {
                    self.show_ticket_detail = !self.show_ticket_detail;
                }
            }
            KeyCode::Char('r') => {
                if let Some(idx) = self.ticket_state.selected() {
                    if let Some(ticket) = self.session.tickets().get(idx) {
                        let id = ticket.id.clone();
                        self.session.resolve_ticket(&id, now);
                    }
                }
            }
            _ => {}
        }
    }

    /// Keyboard input for the metrics tab.
    fn handle_metrics_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
        }
    }

    /// Keep the FAQ selection inside the filtered list as it shrinks.
    fn clamp_faq_selection(&mut self) {
        let len = self.filtered_faqs().len();
        match self.faq_state.selected() {
            Some(_) if len == 0 => {
                self.faq_state.select(None);
                self.expanded_faq = None;
            }
            Some(idx) if idx >= len => {
                self.faq_state.select(Some(len - 1));
            }
            None if len > 0 => {
                self.faq_state.select(Some(0));
            }
            _ => {}
        }
    }

    fn select_next_faq(&mut self) {
        let len = self.filtered_faqs().len();
        if len == 0 {
            return;
        }
        let i = match self.faq_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.faq_state.select(Some(i));
    }

    fn select_previous_faq(&mut self) {
        let len = self.filtered_faqs().len();
        if len == 0 {
            return;
        }
        let i = match self.faq_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.faq_state.select(Some(i));
    }

    /// Expand or collapse the selected FAQ's answer.
    fn toggle_faq(&mut self) {
        let faqs = self.filtered_faqs();
        if let Some(faq) = self.faq_state.selected().and_then(|i| faqs.get(i)) {
            self.expanded_faq = if self.expanded_faq == Some(faq.id) {
                None
            } else {
                Some(faq.id)
            };
        }
    }

    fn select_next_ticket(&mut self) {
        let len = self.session.tickets().len();
        if len == 0 {
            return;
        }
        let i = match self.ticket_state.selected() {
            Some(i) if i >= len - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.ticket_state.select(Some(i));
    }

    fn select_previous_ticket(&mut self) {
        let len = self.session.tickets().len();
        if len == 0 {
            return;
        }
        let i = match self.ticket_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.ticket_state.select(Some(i));
    }
}
