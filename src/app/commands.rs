//! List commands and the `:` prompt language.
//!
//! Key presses and typed command lines both resolve to a [`Command`]. Each
//! typed command has a short form and one or more long aliases, e.g. `n` and
//! `next`. A bare number jumps to that page and `/term` searches.

use anyhow::{Context, Result, bail};

/// Actions the list view understands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Go to the next page.
    NextPage,
    /// Go to the previous page.
    PrevPage,
    FirstPage,
    LastPage,
    /// Jump to a 1-indexed page.
    GoToPage(usize),
    /// Filter the list by a free-text term.
    Search(String),
    ClearSearch,
    /// Change the number of rows per page.
    PageSize(usize),
    /// Switch to the next standard page size.
    CyclePageSize,
    /// Delete the n-th row (1-indexed) of the current page.
    Delete(usize),
    /// Re-read the dataset from its source.
    Reload,
    Help,
    Quit,
}

/// Parse one input line.
///
/// Blank lines yield `Ok(None)`, which callers treat as "redraw".
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    if let Some(term) = line.strip_prefix('/') {
        return Ok(Some(if term.trim().is_empty() {
            Command::ClearSearch
        } else {
            Command::Search(term.to_string())
        }));
    }
    if let Ok(page) = line.parse::<usize>() {
        return Ok(Some(Command::GoToPage(page)));
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };
    let cmd = match word.to_ascii_lowercase().as_str() {
        "n" | "next" | ">" => Command::NextPage,
        "p" | "prev" | "<" => Command::PrevPage,
        "first" | "home" => Command::FirstPage,
        "last" | "end" => Command::LastPage,
        "g" | "goto" => Command::GoToPage(parse_number(word, rest)?),
        "s" | "search" => {
            if rest.is_empty() {
                Command::ClearSearch
            } else {
                Command::Search(rest.to_string())
            }
        }
        "c" | "clear" => Command::ClearSearch,
        "size" if rest.is_empty() => Command::CyclePageSize,
        "size" => Command::PageSize(parse_number(word, rest)?),
        "d" | "delete" => Command::Delete(parse_number(word, rest)?),
        "r" | "reload" => Command::Reload,
        "?" | "h" | "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        _ => bail!("unknown command: {}", word),
    };
    Ok(Some(cmd))
}

fn parse_number(word: &str, arg: &str) -> Result<usize> {
    arg.parse::<usize>()
        .with_context(|| format!("{} expects a number, got {:?}", word, arg))
}

/// `:` command reference as (syntax, description) rows, in display order.
pub fn help_entries() -> &'static [(&'static str, &'static str)] {
    &[
        ("n, next, >", "Next page"),
        ("p, prev, <", "Previous page"),
        ("first / last", "First or last page"),
        ("<N>, g <N>", "Go to page N"),
        ("/<term>, s <term>", "Search"),
        ("/, c, clear", "Clear search"),
        ("size <N>", "Rows per page"),
        ("size", "Cycle 10/20/50/100 rows per page"),
        ("d <N>", "Delete row N of this page"),
        ("r, reload", "Reload data"),
        ("?, help", "Show this help"),
        ("q, quit", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_navigation_aliases() {
        assert_eq!(parse_command("n").unwrap(), Some(Command::NextPage));
        assert_eq!(parse_command(" NEXT ").unwrap(), Some(Command::NextPage));
        assert_eq!(parse_command("<").unwrap(), Some(Command::PrevPage));
        assert_eq!(parse_command("last").unwrap(), Some(Command::LastPage));
        assert_eq!(parse_command("7").unwrap(), Some(Command::GoToPage(7)));
        assert_eq!(parse_command("g 3").unwrap(), Some(Command::GoToPage(3)));
    }

    #[test]
    fn parses_search_forms() {
        assert_eq!(
            parse_command("/first bank").unwrap(),
            Some(Command::Search("first bank".to_string()))
        );
        assert_eq!(
            parse_command("search  Dhaka").unwrap(),
            Some(Command::Search("Dhaka".to_string()))
        );
        assert_eq!(parse_command("/").unwrap(), Some(Command::ClearSearch));
        assert_eq!(parse_command("s").unwrap(), Some(Command::ClearSearch));
    }

    #[test]
    fn numeric_arguments_are_validated() {
        assert_eq!(parse_command("size 20").unwrap(), Some(Command::PageSize(20)));
        assert_eq!(parse_command("d 2").unwrap(), Some(Command::Delete(2)));
        assert_eq!(parse_command("size").unwrap(), Some(Command::CyclePageSize));
        assert!(parse_command("size ten").is_err());
        assert!(parse_command("g two").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert_eq!(parse_command("   ").unwrap(), None);
        let err = parse_command("frobnicate now").unwrap_err();
        assert!(err.to_string().contains("frobnicate"));
    }
}
