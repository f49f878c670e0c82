//! Shared UI components (header, pager, status bar, help overlay).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::commands::help_entries;
use crate::app::{AppState, InputMode};
use crate::pager::{PageLink, page_numbers};

/// Key bindings of the list view, in display order.
const KEY_HELP: &[(&str, &str)] = &[
    ("→ l n PgDn", "Next page"),
    ("← h p PgUp", "Previous page"),
    ("g Home / G End", "First or last page"),
    ("1-9", "Go to page"),
    ("↑ k / ↓ j", "Select row"),
    ("/", "Search (Enter applies, Esc cancels)"),
    ("Esc", "Clear search"),
    ("s", "Cycle rows per page"),
    ("d Del", "Delete selected row"),
    ("r", "Reload data"),
    (":", "Command prompt"),
    ("?", "Toggle this help"),
    ("q Ctrl-C", "Quit"),
];

/// Header: record count, searched fields and the active term or prompt.
pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let fields = app.list.searchable_fields();
    let fields = if fields.is_all() { "all".to_string() } else { fields.to_list() };
    let mut spans = vec![
        Span::styled(
            format!("{} ({})", app.entity.title(), app.list.data().len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  fields: {}", fields)),
    ];
    match app.input_mode {
        InputMode::Search => spans.push(Span::styled(
            format!("  search: {}_", app.input),
            Style::default().fg(Color::Yellow),
        )),
        InputMode::Command => spans.push(Span::styled(
            format!("  :{}_", app.input),
            Style::default().fg(Color::Yellow),
        )),
        InputMode::Normal => {
            let term = app.list.search_term().trim();
            if !term.is_empty() {
                spans.push(Span::raw(format!("  search: {}", term)));
            }
        }
    }
    let p = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title("adminlist")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(p, area);
}

/// Pager line such as `« 1 … 4 [5] 6 … 10 »`.
///
/// The arrows are only drawn when that direction is available.
pub fn render_pager(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.list;
    let mut spans: Vec<Span> = Vec::new();
    if list.has_prev_page() {
        spans.push(Span::raw("« "));
    }
    for link in page_numbers(list.current_page(), list.total_pages()) {
        match link {
            PageLink::Page(p) if p == list.current_page() => spans.push(Span::styled(
                format!("[{}]", p),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )),
            PageLink::Page(p) => spans.push(Span::raw(p.to_string())),
            PageLink::Gap => spans.push(Span::raw("…")),
        }
        spans.push(Span::raw(" "));
    }
    if list.has_next_page() {
        spans.push(Span::raw("»"));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Status bar: shown range, match count, page position, page size and the
/// latest message.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let list = &app.list;
    let mut msg = format!(
        "showing {}-{} of {}  page {}/{}  rows/page:{}",
        list.start_index(),
        list.end_index(),
        list.total_items(),
        list.current_page(),
        list.total_pages(),
        list.page_size()
    );
    if let Some(note) = &app.message {
        msg.push_str("  | ");
        msg.push_str(note);
    }
    let p = Paragraph::new(msg).style(Style::default().fg(Color::Black).bg(Color::Gray));
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Help overlay listing key bindings and `:` commands.
pub fn render_help_modal(f: &mut Frame, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    push_section(&mut lines, "Keys", KEY_HELP);
    lines.push(Line::raw(""));
    push_section(&mut lines, "Commands (after :)", help_entries());

    let height = (lines.len() as u16).saturating_add(2);
    let rect = centered_rect(60, height, area);
    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

fn push_section(lines: &mut Vec<Line<'static>>, title: &'static str, entries: &[(&str, &str)]) {
    let w = entries.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    lines.push(Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (keys, what) in entries {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<w$}  ", keys, w = w)),
            Span::styled(what.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }
}
