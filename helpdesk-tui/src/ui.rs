//! UI rendering for the TUI.

use helpdesk_core::format::{format_clock_time, format_relative_time};
use helpdesk_core::knowledge::{self, FAQ_DATA};
use helpdesk_core::{MessageRole, TicketStatus};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Cell, Gauge, Paragraph, Row, Table, Wrap,
    },
    Frame,
};

use crate::app::{ActiveTab, App};

// ========== View Colors ==========
// Consistent colors across all tabs

/// Assistant message accent
const ASSISTANT_COLOR: Color = Color::Rgb(0, 180, 180);
/// User message accent
const USER_COLOR: Color = Color::Rgb(220, 180, 0);
/// System message accent
const SYSTEM_COLOR: Color = Color::Rgb(120, 120, 120);
/// Border color for the chat transcript
const BORDER_CHAT: Color = Color::Rgb(80, 160, 80);
/// Border color for the input line
const BORDER_INPUT: Color = Color::Rgb(0, 150, 150);
/// Border color for detail panels
const BORDER_DETAIL: Color = Color::Rgb(180, 100, 180);
/// Label color for metadata attributes
const LABEL_COLOR: Color = Color::Rgb(100, 180, 180);
/// Escalation badge color
const BADGE_ESCALATION: Color = Color::Rgb(220, 80, 80);
/// Dim gray for secondary text
const DIM_COLOR: Color = Color::Rgb(128, 128, 128);

/// Render the application UI.
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Layout: tab header, tab body, footer
    let chunks = Layout::vertical([
        Constraint::Length(2), // Tab header
        Constraint::Min(5),    // Active tab
        Constraint::Length(1), // Footer
    ])
    .split(area);

    render_tab_header(frame, app, chunks[0]);
    match app.active_tab {
        ActiveTab::Chat => render_chat_view(frame, app, chunks[1]),
        ActiveTab::Knowledge => render_knowledge_view(frame, app, chunks[1]),
        ActiveTab::Escalations => render_escalations_view(frame, app, chunks[1]),
        ActiveTab::Metrics => render_metrics_view(frame, app, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);
}

/// Render the tab bar with the app name and per-tab badges.
fn render_tab_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![
        Span::styled(
            " helpdesk ",
            Style::default()
                .fg(Color::Black)
                .bg(ASSISTANT_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];

    for tab in ActiveTab::all() {
        let active = tab == app.active_tab;
        let style = if active {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(DIM_COLOR)
        };
        spans.push(Span::styled(tab.label(), style));

        // Unresolved-ticket badge on the Escalations tab
        if tab == ActiveTab::Escalations {
            let unresolved = app.session.unresolved_ticket_count();
            if unresolved > 0 {
                spans.push(Span::styled(
                    format!(" ({})", unresolved),
                    Style::default()
                        .fg(BADGE_ESCALATION)
                        .add_modifier(Modifier::BOLD),
                ));
            }
        }
        spans.push(Span::raw("   "));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// Render the live chat tab: transcript above, input line below.
fn render_chat_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Min(5),    // Transcript
        Constraint::Length(3), // Input
    ])
    .split(area);

    render_transcript(frame, app, chunks[0]);
    render_input_line(frame, app, chunks[1]);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for message in app.session.messages() {
        let (name, color) = match message.role {
            MessageRole::User => ("you", USER_COLOR),
            MessageRole::Assistant => ("support", ASSISTANT_COLOR),
            MessageRole::System => ("system", SYSTEM_COLOR),
        };
        let mut header = vec![
            Span::styled(
                name,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", format_clock_time(message.timestamp)),
                Style::default().fg(DIM_COLOR),
            ),
        ];
        if let Some(category) = &message.category {
            header.push(Span::styled(
                format!("  [{}]", category),
                Style::default().fg(LABEL_COLOR),
            ));
        }
        lines.push(Line::from(header));
        for wrapped in wrap_text(&message.content, inner_width) {
            lines.push(Line::from(Span::raw(wrapped)));
        }
        lines.push(Line::from(""));
    }

    if app.session.is_awaiting_response() {
        lines.push(Line::from(Span::styled(
            "support is typing...",
            Style::default().fg(DIM_COLOR).add_modifier(Modifier::ITALIC),
        )));
    }

    // Pin to the bottom unless the user has scrolled up
    let visible = area.height.saturating_sub(2) as usize;
    let max_scroll = lines.len().saturating_sub(visible);
    if app.follow_chat {
        app.chat_scroll = max_scroll;
    } else {
        app.chat_scroll = app.chat_scroll.min(max_scroll);
    }

    let transcript = Paragraph::new(lines)
        .scroll((app.chat_scroll as u16, 0))
        .block(
            Block::default()
                .title(" Conversation ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(BORDER_CHAT)),
        );
    frame.render_widget(transcript, area);
}

fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.session.is_awaiting_response() {
        (
            "waiting for support...".to_string(),
            Style::default().fg(DIM_COLOR),
        )
    } else {
        (format!("{}_", app.input), Style::default().fg(Color::White))
    };
    let input = Paragraph::new(Line::from(Span::styled(text, style))).block(
        Block::default()
            .title(" Message ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_INPUT)),
    );
    frame.render_widget(input, area);
}

/// Render the knowledge base tab: search line, category chips, FAQ table,
/// and the expanded answer panel when one is open.
fn render_knowledge_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let has_detail = app.expanded_faq.is_some();
    let constraints = if has_detail {
        vec![
            Constraint::Length(3), // Search
            Constraint::Length(1), // Category chips
            Constraint::Min(4),    // FAQ table
            Constraint::Length(7), // Answer panel
        ]
    } else {
        vec![
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(4),
        ]
    };
    let chunks = Layout::vertical(constraints).split(area);

    let search = Paragraph::new(Line::from(vec![
        Span::styled("search: ", Style::default().fg(LABEL_COLOR)),
        Span::raw(format!("{}_", app.search)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_INPUT)),
    );
    frame.render_widget(search, chunks[0]);

    let mut chip_spans = vec![Span::raw(" ")];
    for (i, category) in knowledge::categories(FAQ_DATA).iter().enumerate() {
        let style = if i == app.category_index {
            Style::default()
                .fg(Color::Black)
                .bg(LABEL_COLOR)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DIM_COLOR)
        };
        chip_spans.push(Span::styled(format!(" {} ", category), style));
        chip_spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(chip_spans)), chunks[1]);

    let faqs = app.filtered_faqs();
    let rows: Vec<Row> = faqs
        .iter()
        .map(|faq| {
            Row::new(vec![
                Cell::from(faq.question),
                Cell::from(Span::styled(
                    faq.category,
                    Style::default().fg(LABEL_COLOR),
                )),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Percentage(75), Constraint::Percentage(25)],
    )
    .header(
        Row::new(vec!["Question", "Category"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::Rgb(40, 40, 60))
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .title(format!(" FAQs ({}) ", faqs.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_CHAT)),
    );
    frame.render_stateful_widget(table, chunks[2], &mut app.faq_state);

    if let Some(id) = app.expanded_faq {
        if let Some(faq) = faqs.iter().find(|f| f.id == id) {
            let mut lines = vec![Line::from(Span::styled(
                faq.question,
                Style::default().add_modifier(Modifier::BOLD),
            ))];
            lines.push(Line::from(Span::raw(faq.answer)));
            lines.push(Line::from(Span::styled(
                format!("tags: {}", faq.tags.join(", ")),
                Style::default().fg(DIM_COLOR),
            )));
            let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .title(" Answer ")
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(BORDER_DETAIL)),
            );
            frame.render_widget(detail, chunks[3]);
        }
    }
}

/// Render the escalations tab: ticket table, plus the conversation
/// snapshot panel when a ticket is opened.
fn render_escalations_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let has_detail = app.show_ticket_detail && app.ticket_state.selected().is_some();
    let chunks = if has_detail {
        Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).split(area)
    } else {
        Layout::vertical([Constraint::Min(4)]).split(area)
    };

    let tickets = app.session.tickets();
    let rows: Vec<Row> = tickets
        .iter()
        .map(|ticket| {
            let status_style = match ticket.status {
                TicketStatus::Resolved => Style::default().fg(Color::Green),
                TicketStatus::Escalated => Style::default().fg(BADGE_ESCALATION),
                _ => Style::default().fg(Color::Yellow),
            };
            Row::new(vec![
                Cell::from(ticket.subject.clone()),
                Cell::from(ticket.priority.as_str()),
                Cell::from(Span::styled(ticket.status.as_str(), status_style)),
                Cell::from(format_relative_time(ticket.created_at)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(12),
        ],
    )
    .header(
        Row::new(vec!["Subject", "Priority", "Status", "Created"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .row_highlight_style(
        Style::default()
            .bg(Color::Rgb(40, 40, 60))
            .add_modifier(Modifier::BOLD),
    )
    .block(
        Block::default()
            .title(format!(" Escalated Tickets ({}) ", tickets.len()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BORDER_CHAT)),
    );
    frame.render_stateful_widget(table, chunks[0], &mut app.ticket_state);

    if has_detail {
        if let Some(ticket) = app
            .ticket_state
            .selected()
            .and_then(|i| app.session.tickets().get(i))
        {
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("id: ", Style::default().fg(LABEL_COLOR)),
                    Span::raw(ticket.id.clone()),
                    Span::styled("   customer: ", Style::default().fg(LABEL_COLOR)),
                    Span::raw(ticket.customer_id.clone()),
                ]),
                Line::from(""),
            ];
            for message in &ticket.messages {
                let color = match message.role {
                    MessageRole::User => USER_COLOR,
                    MessageRole::Assistant => ASSISTANT_COLOR,
                    MessageRole::System => SYSTEM_COLOR,
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{}: ", message.role.as_str()),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(message.content.clone()),
                ]));
            }
            let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
                Block::default()
                    .title(format!(" {} ", ticket.subject))
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(BORDER_DETAIL)),
            );
            frame.render_widget(detail, chunks[1]);
        }
    }
}

/// Render the metrics tab: counter cards plus two gauges.
fn render_metrics_view(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Counter cards
        Constraint::Length(3), // Resolution gauge
        Constraint::Length(3), // Satisfaction gauge
        Constraint::Min(0),
    ])
    .split(area);

    let cards = Layout::horizontal([
        Constraint::Percentage(33),
        Constraint::Percentage(33),
        Constraint::Percentage(34),
    ])
    .split(chunks[0]);

    let metrics = &app.metrics;
    render_metric_card(
        frame,
        cards[0],
        "Total Queries",
        &metrics.total_queries.to_string(),
        ASSISTANT_COLOR,
    );
    render_metric_card(
        frame,
        cards[1],
        "Resolved",
        &metrics.resolved_queries.to_string(),
        Color::Green,
    );
    render_metric_card(
        frame,
        cards[2],
        "Avg Response (s)",
        &format!("{:.1}", metrics.average_response_time),
        USER_COLOR,
    );

    let resolution = metrics.resolution_rate();
    let resolution_gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Resolution Rate ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio((resolution / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", resolution));
    frame.render_widget(resolution_gauge, chunks[1]);

    let satisfaction_gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Customer Satisfaction ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(LABEL_COLOR))
        .ratio((metrics.customer_satisfaction_rate / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.1}%", metrics.customer_satisfaction_rate));
    frame.render_widget(satisfaction_gauge, chunks[2]);

    let escalation = Paragraph::new(Line::from(vec![
        Span::styled("escalation rate: ", Style::default().fg(LABEL_COLOR)),
        Span::raw(format!("{:.1}%", metrics.escalation_rate)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(escalation, chunks[3]);
}

fn render_metric_card(frame: &mut Frame, area: Rect, title: &str, value: &str, color: Color) {
    let card = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    frame.render_widget(card, area);
}

/// Render the footer with key hints for the active tab.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.active_tab {
        ActiveTab::Chat => "Tab: switch | Enter: send | ↑/↓: scroll | Esc: quit",
        ActiveTab::Knowledge => {
            "Tab: switch | type to search | ←/→: category | ↑/↓: select | Enter: expand | Esc: quit"
        }
        ActiveTab::Escalations => {
            "Tab: switch | ↑/↓: select | Enter: detail | r: resolve | Esc: quit"
        }
        ActiveTab::Metrics => "Tab: switch | Esc: quit",
    };
    let footer = Paragraph::new(Line::from(Span::raw(hints).dim())).alignment(Alignment::Center);
    frame.render_widget(footer, area);
}

/// Greedy word wrap for transcript content.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 10);
        assert!(lines.iter().all(|l| l.len() <= 10));
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn test_wrap_text_empty() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
