//! Engine error type.
//!
//! The engine itself only fails on contract violations ([`PagerError`]).
//! Everything that touches files or user input reports through `anyhow`.
use std::fmt::{Display, Formatter};

/// Contract violations rejected by [`crate::view::PaginatedSearch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagerError {
    /// A page size of zero was requested.
    InvalidPageSize(usize),
    /// An initial page of zero was requested (pages are 1-indexed).
    InvalidInitialPage(usize),
}

impl Display for PagerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PagerError::InvalidPageSize(n) => {
                write!(f, "items per page must be greater than zero (got {})", n)
            }
            PagerError::InvalidInitialPage(n) => {
                write!(f, "initial page must be 1 or greater (got {})", n)
            }
        }
    }
}

impl std::error::Error for PagerError {}
