//! Library crate for adminlist.
//!
//! This crate exposes the building blocks of the admin list views:
//! - Paginated search view-model (`view`)
//! - Pure pagination derivation and pager helpers (`pager`)
//! - In-memory search helpers (`search`)
//! - Engine error type (`error`)
//! - Record-file data source and entity catalog (`store`)
//! - List view state, config, commands and the event loop (`app`)
//! - Terminal rendering with `ratatui` (`ui`)
//!
//! It is used by the `adminlist` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod app;
pub mod error;
pub mod pager;
pub mod search;
pub mod store;
pub mod ui;
pub mod view;

// Re-export commonly used items at the crate root for convenience
pub use error::PagerError;
pub use search::{SearchFields, Searchable};
pub use view::{PaginatedSearch, ViewOptions};
