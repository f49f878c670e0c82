use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::Backend;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::app::commands::{Command, parse_command};
use crate::app::{AppState, InputMode};
use crate::{pager, store, ui};

/// What the loop should do after an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Draw, wait for a key, handle it, repeat until the user quits.
pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Outcome::Quit {
                    break;
                }
            }
        }
    }
    Ok(())
}

/// Route one key press according to the current input mode.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Outcome {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Outcome::Quit;
    }
    app.message = None;
    if app.show_help {
        app.show_help = false;
        return Outcome::Continue;
    }
    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                app.selected = app.selected.saturating_sub(1);
                Outcome::Continue
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.selected += 1;
                app.clamp_selection();
                Outcome::Continue
            }
            KeyCode::Char('/') => {
                app.input = app.list.search_term().to_string();
                app.input_mode = InputMode::Search;
                Outcome::Continue
            }
            KeyCode::Char(':') => {
                app.input.clear();
                app.input_mode = InputMode::Command;
                Outcome::Continue
            }
            code => match key_command(app, code) {
                Some(cmd) => apply_command(app, cmd),
                None => Outcome::Continue,
            },
        },
        InputMode::Search | InputMode::Command => match key.code {
            KeyCode::Enter => submit_input(app),
            KeyCode::Esc => {
                app.input.clear();
                app.input_mode = InputMode::Normal;
                Outcome::Continue
            }
            KeyCode::Backspace => {
                app.input.pop();
                Outcome::Continue
            }
            KeyCode::Char(c) => {
                app.input.push(c);
                Outcome::Continue
            }
            _ => Outcome::Continue,
        },
    }
}

/// Normal-mode key bindings.
fn key_command(app: &AppState, code: KeyCode) -> Option<Command> {
    let cmd = match code {
        KeyCode::Char('q') => Command::Quit,
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') | KeyCode::Char('n') => {
            Command::NextPage
        }
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') | KeyCode::Char('p') => {
            Command::PrevPage
        }
        KeyCode::Home | KeyCode::Char('g') => Command::FirstPage,
        KeyCode::End | KeyCode::Char('G') => Command::LastPage,
        KeyCode::Char(c @ '1'..='9') => Command::GoToPage(c as usize - '0' as usize),
        KeyCode::Char('s') => Command::CyclePageSize,
        KeyCode::Char('d') | KeyCode::Delete => Command::Delete(app.selected + 1),
        KeyCode::Char('r') => Command::Reload,
        KeyCode::Char('?') => Command::Help,
        KeyCode::Esc if !app.list.search_term().is_empty() => Command::ClearSearch,
        _ => return None,
    };
    Some(cmd)
}

fn submit_input(app: &mut AppState) -> Outcome {
    let input = std::mem::take(&mut app.input);
    let mode = std::mem::replace(&mut app.input_mode, InputMode::Normal);
    let parsed = match mode {
        InputMode::Search if input.trim().is_empty() => Ok(Some(Command::ClearSearch)),
        InputMode::Search => Ok(Some(Command::Search(input))),
        _ => parse_command(&input),
    };
    match parsed {
        Ok(Some(cmd)) => apply_command(app, cmd),
        Ok(None) => Outcome::Continue,
        Err(e) => {
            app.message = Some(format!("{:#}", e));
            Outcome::Continue
        }
    }
}

/// Apply one command to the list view.
///
/// Navigation past either end is silently ignored; problems the user should
/// see (bad page size, bad row number, failed reload) end up in `app.message`.
pub fn apply_command(app: &mut AppState, cmd: Command) -> Outcome {
    debug!(?cmd, "apply command");
    let keeps_selection = matches!(cmd, Command::Delete(_) | Command::Help | Command::Quit);
    match cmd {
        Command::NextPage => {
            app.list.next_page();
        }
        Command::PrevPage => {
            app.list.prev_page();
        }
        Command::FirstPage => {
            app.list.first_page();
        }
        Command::LastPage => {
            app.list.last_page();
        }
        Command::GoToPage(page) => {
            app.list.go_to_page(page);
        }
        Command::Search(term) => app.list.set_search_term(term),
        Command::ClearSearch => app.list.set_search_term(""),
        Command::PageSize(size) => {
            if let Err(e) = app.list.set_page_size(size) {
                app.message = Some(e.to_string());
            }
        }
        Command::CyclePageSize => {
            let size = pager::next_page_size(app.list.page_size());
            if let Err(e) = app.list.set_page_size(size) {
                app.message = Some(e.to_string());
            }
        }
        Command::Delete(row) => delete_row(app, row),
        Command::Reload => reload(app),
        Command::Help => app.show_help = true,
        Command::Quit => return Outcome::Quit,
    }
    if keeps_selection {
        app.clamp_selection();
    } else {
        app.selected = 0;
    }
    Outcome::Continue
}

/// Remove the `row`-th item (1-indexed) of the current page and hand the
/// shortened dataset back to the engine.
fn delete_row(app: &mut AppState, row: usize) {
    let Some(&index) = row
        .checked_sub(1)
        .and_then(|i| app.list.view().paged_indices().get(i))
    else {
        app.message = Some(format!("no row {} on this page", row));
        return;
    };
    let item = &app.list.data()[index];
    let label = item
        .get("name")
        .or_else(|| item.values().first().map(String::as_str))
        .unwrap_or_default()
        .to_string();
    let remaining = store::without_index(&app.list.data()[..], index);
    app.list.set_data(remaining);
    info!(entity = %app.entity, index, "row deleted");
    app.message = Some(format!("deleted {}", label));
}

fn reload(app: &mut AppState) {
    let Some(path) = app.source.clone() else {
        app.message = Some("nothing to reload".to_string());
        return;
    };
    match store::load_dataset(&path) {
        Ok(file) => {
            app.columns = file.columns;
            app.list.set_data(file.records);
            app.message = Some(format!("reloaded {} rows", app.list.data().len()));
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "reload failed");
            app.message = Some(format!("reload failed: {:#}", e));
        }
    }
}
