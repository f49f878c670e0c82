//! Terminal rendering of a list view.
//!
//! Header with the search prompt on top, the records table for the current
//! page in the middle, then the pager and the status bar. The help overlay
//! is drawn last when open.
pub mod components;
pub mod table;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    components::render_header(f, root[0], app);
    table::render_records_table(f, root[1], app);
    components::render_pager(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if app.show_help {
        components::render_help_modal(f, f.area());
    }
}
