//! Application state and entry glue.
//!
//! Holds the list view being browsed (entity kind, its record columns and
//! the paginated search engine over its records), the input state of the
//! terminal UI, plus config file lookup. The event loop lives in [`update`]
//! and is re-exported as `run`.
//!
pub mod commands;
pub mod listconf;
pub mod update;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use tracing::{info, warn};

use crate::store::{self, EntityKind, Record, RecordFile};
use crate::view::{PaginatedSearch, ViewOptions};

/// What key presses currently edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a search term after `/`.
    Search,
    /// Typing a command line after `:`.
    Command,
}

/// State of one list view.
pub struct AppState {
    pub entity: EntityKind,
    /// File the records were read from, used by reload.
    pub source: Option<PathBuf>,
    pub columns: Arc<[String]>,
    pub list: PaginatedSearch<Record>,
    pub input_mode: InputMode,
    /// Text typed at the search or command prompt.
    pub input: String,
    /// Highlighted row on the current page (0-based).
    pub selected: usize,
    pub show_help: bool,
    /// One-shot feedback shown in the status bar until the next key press.
    pub message: Option<String>,
}

impl AppState {
    /// Build the view over already-loaded records.
    pub fn new(entity: EntityKind, file: RecordFile, options: ViewOptions) -> anyhow::Result<Self> {
        let missing = entity.missing_columns(&file.columns);
        if !missing.is_empty() {
            warn!(entity = %entity, missing = ?missing, "record file lacks expected columns");
        }
        let list = PaginatedSearch::new(file.records, options)?;
        Ok(Self {
            entity,
            source: None,
            columns: file.columns,
            list,
            input_mode: InputMode::Normal,
            input: String::new(),
            selected: 0,
            show_help: false,
            message: None,
        })
    }

    /// Read `path` and build the view over its records.
    pub fn load(entity: EntityKind, path: &Path, options: ViewOptions) -> anyhow::Result<Self> {
        let file = store::load_dataset(path).with_context(|| format!("loading {} data", entity))?;
        info!(entity = %entity, rows = file.records.len(), "dataset loaded");
        let mut app = Self::new(entity, file, options)?;
        app.source = Some(path.to_path_buf());
        Ok(app)
    }

    /// Keep the highlighted row on the current page.
    pub fn clamp_selection(&mut self) {
        let rows = self.list.view().paged_indices().len();
        self.selected = self.selected.min(rows.saturating_sub(1));
    }
}

/// Locate an existing config file in the standard locations.
///
/// Looks in `$ADMINLIST_CONFIG_DIR`, then `$XDG_CONFIG_HOME/adminlist`, then
/// `$HOME/.config/adminlist`.
pub fn config_file_read_path(name: &str) -> Option<String> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    if let Some(dir) = std::env::var_os("ADMINLIST_CONFIG_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
        dirs.push(PathBuf::from(xdg).join("adminlist"));
    }
    if let Some(home) = std::env::var_os("HOME") {
        dirs.push(PathBuf::from(home).join(".config").join("adminlist"));
    }
    dirs.into_iter()
        .map(|d| d.join(name))
        .find(|p| p.is_file())
        .map(|p| p.to_string_lossy().into_owned())
}

/// Re-export the event loop entry function.
pub use update::run_app as run;
