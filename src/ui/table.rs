use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use crate::app::AppState;

/// Draw the current page as a table with a leading position column.
///
/// Positions are 1-based within the filtered result, so they line up with
/// the "showing a-b of n" range in the status bar.
pub fn render_records_table(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .title(app.entity.title())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let items = app.list.paged_items();
    if items.is_empty() {
        let term = app.list.search_term().trim();
        let text = if term.is_empty() {
            format!("(no {})", app.entity.name())
        } else {
            format!("(no {} match {:?})", app.entity.name(), term)
        };
        f.render_widget(Paragraph::new(text).block(block), area);
        return;
    }

    let first = app.list.start_index();
    let rows = items.iter().enumerate().map(|(i, record)| {
        let style = if i == app.selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let position = Cell::from((first + i).to_string());
        Row::new(
            std::iter::once(position).chain(record.values().iter().map(|v| Cell::from(v.as_str()))),
        )
        .style(style)
    });

    let position_width = app.list.end_index().to_string().len().max(1) as u16;
    let widths = std::iter::once(Constraint::Length(position_width))
        .chain(app.columns.iter().map(|_| Constraint::Fill(1)));

    let header = Row::new(
        std::iter::once("#".to_string()).chain(app.columns.iter().map(|c| c.to_uppercase())),
    )
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(2);

    f.render_widget(table, area);
}
