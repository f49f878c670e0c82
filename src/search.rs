//! In-memory search helpers.
//!
//! Items expose their searchable text through [`Searchable`]; a search term
//! is matched case-insensitively as a substring of those fields, optionally
//! restricted to a named subset via [`SearchFields`].
use std::borrow::Cow;
use std::collections::BTreeSet;

/// Text extraction for free-text search.
///
/// `text_fields` lists every field that takes part in an unrestricted
/// search, as `(field name, text)` pairs. Numeric or optional attributes can
/// be rendered to text here (`Cow::Owned`) so they stay searchable.
pub trait Searchable {
    fn text_fields(&self) -> Vec<(&str, Cow<'_, str>)>;

    /// Text of a single named field, if the item has it.
    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.text_fields()
            .into_iter()
            .find(|(field, _)| *field == name)
            .map(|(_, text)| text)
    }
}

impl Searchable for String {
    fn text_fields(&self) -> Vec<(&str, Cow<'_, str>)> {
        vec![("value", Cow::Borrowed(self.as_str()))]
    }
}

/// Which fields of an item participate in search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchFields {
    /// Every field reported by [`Searchable::text_fields`].
    #[default]
    All,
    /// Only the named fields. An empty set behaves like `All`.
    Only(BTreeSet<String>),
}

impl SearchFields {
    pub fn only<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = fields.into_iter().map(Into::into).collect();
        if set.is_empty() { Self::All } else { Self::Only(set) }
    }

    /// Parse a comma-separated field list such as `"name, code"`.
    pub fn parse_list(s: &str) -> Self {
        Self::only(
            s.split(',')
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .map(str::to_string),
        )
    }

    pub fn is_all(&self) -> bool {
        match self {
            SearchFields::All => true,
            SearchFields::Only(set) => set.is_empty(),
        }
    }

    /// Comma-separated form accepted by [`SearchFields::parse_list`]; empty for `All`.
    pub fn to_list(&self) -> String {
        match self {
            SearchFields::All => String::new(),
            SearchFields::Only(set) => set.iter().cloned().collect::<Vec<_>>().join(","),
        }
    }
}

/// Normalize a raw search term: trimmed and lowercased, `None` when blank.
pub fn normalize_term(term: &str) -> Option<String> {
    let t = term.trim();
    if t.is_empty() { None } else { Some(t.to_lowercase()) }
}

/// Whether `item` matches an already-normalized (lowercase) needle.
pub fn matches<T: Searchable + ?Sized>(item: &T, needle: &str, fields: &SearchFields) -> bool {
    match fields {
        SearchFields::Only(names) if !names.is_empty() => names.iter().any(|name| {
            item.field_text(name)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        }),
        _ => item
            .text_fields()
            .iter()
            .any(|(_, text)| text.to_lowercase().contains(needle)),
    }
}

/// Indices of the items matching `term`, in dataset order.
///
/// A blank term matches everything.
pub fn filter_indices<T: Searchable>(data: &[T], term: &str, fields: &SearchFields) -> Vec<usize> {
    match normalize_term(term) {
        None => (0..data.len()).collect(),
        Some(needle) => data
            .iter()
            .enumerate()
            .filter(|(_, item)| matches(*item, &needle, fields))
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Branch {
        name: String,
        city: String,
        code: u32,
    }

    impl Searchable for Branch {
        fn text_fields(&self) -> Vec<(&str, Cow<'_, str>)> {
            vec![
                ("name", Cow::Borrowed(self.name.as_str())),
                ("city", Cow::Borrowed(self.city.as_str())),
                ("code", Cow::Owned(self.code.to_string())),
            ]
        }
    }

    fn mk_branch(name: &str, city: &str, code: u32) -> Branch {
        Branch {
            name: name.to_string(),
            city: city.to_string(),
            code,
        }
    }

    #[test]
    fn filters_across_all_fields_case_insensitively() {
        let data = vec![
            mk_branch("Main Street", "Dhaka", 101),
            mk_branch("Harbor", "Chittagong", 202),
            mk_branch("Airport", "DHAKA", 303),
        ];
        assert_eq!(filter_indices(&data, "dHaKa", &SearchFields::All), vec![0, 2]);
        assert_eq!(filter_indices(&data, "202", &SearchFields::All), vec![1]);
    }

    #[test]
    fn restricted_fields_ignore_other_attributes() {
        let data = vec![
            mk_branch("Dhaka Central", "Sylhet", 1),
            mk_branch("Riverside", "Dhaka", 2),
        ];
        let fields = SearchFields::only(["name"]);
        assert_eq!(filter_indices(&data, "dhaka", &fields), vec![0]);
    }

    #[test]
    fn unknown_restricted_field_matches_nothing() {
        let data = vec![mk_branch("Riverside", "Dhaka", 2)];
        let fields = SearchFields::only(["manager"]);
        assert!(filter_indices(&data, "river", &fields).is_empty());
    }

    #[test]
    fn blank_term_keeps_everything_in_order() {
        let data = vec![mk_branch("b", "x", 1), mk_branch("a", "y", 2)];
        assert_eq!(filter_indices(&data, "   ", &SearchFields::All), vec![0, 1]);
        assert_eq!(filter_indices(&data, "", &SearchFields::All), vec![0, 1]);
    }

    #[test]
    fn special_characters_are_literal() {
        let data = vec!["a[b".to_string(), "a.b".to_string()];
        assert_eq!(filter_indices(&data, "[", &SearchFields::All), vec![0]);
        assert_eq!(filter_indices(&data, ".*", &SearchFields::All), Vec::<usize>::new());
    }

    #[test]
    fn empty_only_set_behaves_like_all() {
        assert_eq!(SearchFields::only(Vec::<String>::new()), SearchFields::All);
        let raw = SearchFields::Only(BTreeSet::new());
        assert!(raw.is_all());
        assert!(matches(&"Harbor".to_string(), "harb", &raw));
    }

    #[test]
    fn parse_list_trims_and_skips_empties() {
        let f = SearchFields::parse_list(" name, ,code ,");
        assert_eq!(f, SearchFields::only(["code", "name"]));
        assert_eq!(f.to_list(), "code,name");
        assert!(SearchFields::parse_list(" , ").is_all());
    }
}
