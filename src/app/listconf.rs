//! List configuration: parse/write `adminlist.conf` and apply it to view options.
//!
//! The file holds the default page size and, per entity kind, the fields the
//! list view searches:
//!
//! ```text
//! page_size = 20
//! search.banks = name,code
//! search.units = all
//! ```

use std::collections::BTreeMap;

use tracing::warn;

use crate::pager::DEFAULT_PAGE_SIZE;
use crate::search::SearchFields;
use crate::store::EntityKind;
use crate::view::ViewOptions;

/// List settings that can be loaded from or saved to a configuration file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Rows per page when the command line does not set one.
    pub page_size: usize,
    /// Per-entity search field overrides. Kinds not listed use their defaults.
    pub search_fields: BTreeMap<EntityKind, SearchFields>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_fields: BTreeMap::new(),
        }
    }
}

impl ListConfig {
    /// Search fields for `kind`: the configured override or the kind's defaults.
    pub fn search_fields_for(&self, kind: EntityKind) -> SearchFields {
        self.search_fields
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_search_fields())
    }

    /// Load the config from `path`, or create defaults if the file doesn't exist.
    ///
    /// When `path` is missing, the standard config locations are tried before
    /// writing a fresh default file to `path`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("adminlist.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let cfg = Self::default();
        if let Err(e) = cfg.write_file(path) {
            warn!(path, error = %e, "could not write default config");
        }
        cfg
    }

    /// Load the config from a file.
    ///
    /// Format: `<key> = <value>`. Comments (`#`) and empty lines are ignored,
    /// as are unknown keys and invalid values.
    ///
    /// Returns `None` if the file can't be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }

            if lhs == "page_size" {
                match rhs.parse::<usize>() {
                    Ok(n) if n > 0 => cfg.page_size = n,
                    _ => warn!(value = rhs, "ignoring invalid page_size"),
                }
            } else if let Some(kind) = lhs.strip_prefix("search.") {
                match kind.parse::<EntityKind>() {
                    Ok(kind) => {
                        cfg.search_fields.insert(kind, parse_fields(rhs));
                    }
                    Err(e) => warn!(key = lhs, error = %e, "ignoring search fields"),
                }
            }
        }
        cfg
    }

    /// Write the config to a file, listing search fields for every entity kind.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# adminlist list settings\n");
        buf.push_str("# page_size: rows per page (overridden by --page-size)\n");
        let _ = writeln!(&mut buf, "page_size = {}\n", self.page_size);
        buf.push_str("# search.<entity>: comma-separated fields to search, or 'all'\n");
        for kind in EntityKind::ALL {
            let fields = self.search_fields_for(kind);
            let value = if fields.is_all() { "all".to_string() } else { fields.to_list() };
            let _ = writeln!(&mut buf, "search.{} = {}", kind.name(), value);
        }
        std::fs::write(path, buf)
    }

    /// Fill `options` with this config's settings for `kind`.
    pub fn apply_to(&self, kind: EntityKind, options: &mut ViewOptions) {
        options.items_per_page = self.page_size;
        options.searchable_fields = self.search_fields_for(kind);
    }

    /// Resolve the view options for `kind`.
    ///
    /// Command-line values win over this config, which wins over the
    /// built-in defaults. `fields` uses the config syntax (`all` or a
    /// comma-separated list).
    pub fn view_options(
        &self,
        kind: EntityKind,
        page_size: Option<usize>,
        fields: Option<&str>,
    ) -> ViewOptions {
        let mut options = ViewOptions::default();
        self.apply_to(kind, &mut options);
        if let Some(size) = page_size {
            options.items_per_page = size;
        }
        if let Some(fields) = fields {
            options.searchable_fields = parse_fields(fields);
        }
        options
    }
}

/// `all` (or `*`) means every field; anything else is a field list.
fn parse_fields(value: &str) -> SearchFields {
    match value.trim() {
        "all" | "*" => SearchFields::All,
        list => SearchFields::parse_list(list),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_reads_page_size_and_fields() {
        let cfg = ListConfig::parse(
            "# c\npage_size = 25\nsearch.banks = name\nsearch.unit = all\n\
             search.widgets = x\nbogus = 1\n",
        );
        assert_eq!(cfg.page_size, 25);
        assert_eq!(cfg.search_fields_for(EntityKind::Banks), SearchFields::only(["name"]));
        assert_eq!(cfg.search_fields_for(EntityKind::Units), SearchFields::All);
        assert_eq!(
            cfg.search_fields_for(EntityKind::Shops),
            EntityKind::Shops.default_search_fields()
        );
        assert_eq!(cfg.search_fields.len(), 2);
    }

    #[test]
    fn invalid_page_size_keeps_default() {
        assert_eq!(ListConfig::parse("page_size = 0").page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(ListConfig::parse("page_size = many").page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn apply_to_sets_size_and_fields() {
        let cfg = ListConfig::parse("page_size = 50\nsearch.sales = status");
        let mut opts = ViewOptions::default();
        cfg.apply_to(EntityKind::Sales, &mut opts);
        assert_eq!(opts.items_per_page, 50);
        assert_eq!(opts.searchable_fields, SearchFields::only(["status"]));
        assert_eq!(opts.initial_page, 1);
    }

    #[test]
    fn view_options_prefers_command_line_then_config() {
        let cfg = ListConfig::parse("page_size = 50\nsearch.banks = code");

        let opts = cfg.view_options(EntityKind::Banks, None, None);
        assert_eq!(opts.items_per_page, 50);
        assert_eq!(opts.searchable_fields, SearchFields::only(["code"]));

        let opts = cfg.view_options(EntityKind::Banks, Some(20), Some("name, address"));
        assert_eq!(opts.items_per_page, 20);
        assert_eq!(opts.searchable_fields, SearchFields::only(["name", "address"]));

        let opts = cfg.view_options(EntityKind::Banks, None, Some("all"));
        assert_eq!(opts.items_per_page, 50);
        assert_eq!(opts.searchable_fields, SearchFields::All);
    }

    #[test]
    fn view_options_falls_back_to_defaults() {
        let opts = ListConfig::default().view_options(EntityKind::Units, None, None);
        assert_eq!(opts.items_per_page, DEFAULT_PAGE_SIZE);
        assert_eq!(opts.searchable_fields, EntityKind::Units.default_search_fields());

        let opts = ListConfig::parse("page_size = 100").view_options(EntityKind::Units, None, None);
        assert_eq!(opts.items_per_page, 100);
    }
}
