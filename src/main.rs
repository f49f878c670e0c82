//! adminlist binary entry point.
//!
//! Loads a record file for one entity kind, applies the list options,
//! switches the terminal to raw mode and runs the list view event loop,
//! restoring the terminal state on exit.
//!
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use adminlist::app::{self, AppState, listconf::ListConfig};
use adminlist::store::EntityKind;
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adminlist")]
#[command(about = "Browse admin records with client-side search and pagination")]
struct Args {
    /// Entity kind of the records (banks, branches, customers, ...)
    #[arg(short, long)]
    entity: EntityKind,
    /// Colon-separated record file; first line is the header
    #[arg(short, long)]
    data: PathBuf,
    /// Initial search term
    #[arg(short, long)]
    search: Option<String>,
    /// Initial page (1-indexed)
    #[arg(short, long, default_value_t = 1)]
    page: usize,
    /// Rows per page (overrides the config file)
    #[arg(long)]
    page_size: Option<usize>,
    /// Comma-separated fields to search, or "all" (overrides the config file)
    #[arg(long)]
    fields: Option<String>,
    /// Config file path
    #[arg(long, env = "ADMINLIST_CONFIG", default_value = "adminlist.conf")]
    config: String,
    /// Write logs to this file instead of stderr
    #[arg(long, env = "ADMINLIST_LOG")]
    log_file: Option<PathBuf>,
}

/// Initialize tracing, filtered by `RUST_LOG` (default `adminlist=warn`).
///
/// Logs go to `log_file` when given; stderr shares the screen with the UI.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("adminlist=warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    debug!(?args, "starting");

    let config = ListConfig::load_or_init(&args.config);
    let options = config.view_options(args.entity, args.page_size, args.fields.as_deref());
    let mut app = AppState::load(args.entity, &args.data, options)?;

    if let Some(term) = &args.search {
        app.list.set_search_term(term.as_str());
    }
    app.list.go_to_page(args.page);

    let mut terminal = init_terminal().context("init terminal")?;

    let res = app::run(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}
