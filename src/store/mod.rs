//! Data source for list views.
//!
//! Stands in for the fetch layer of the admin app: datasets are read from
//! colon-separated record files, one file per entity kind. The header line
//! names the columns and every following line is a row.
use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, warn};

use crate::search::{SearchFields, Searchable};

/// Entity kinds managed by the admin interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKind {
    Banks,
    Branches,
    Customers,
    Employees,
    Inventories,
    Products,
    Purchases,
    Sales,
    Shops,
    Suppliers,
    Units,
}

impl EntityKind {
    pub const ALL: [EntityKind; 11] = [
        EntityKind::Banks,
        EntityKind::Branches,
        EntityKind::Customers,
        EntityKind::Employees,
        EntityKind::Inventories,
        EntityKind::Products,
        EntityKind::Purchases,
        EntityKind::Sales,
        EntityKind::Shops,
        EntityKind::Suppliers,
        EntityKind::Units,
    ];

    /// Key used on the command line and in config files.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Banks => "banks",
            EntityKind::Branches => "branches",
            EntityKind::Customers => "customers",
            EntityKind::Employees => "employees",
            EntityKind::Inventories => "inventories",
            EntityKind::Products => "products",
            EntityKind::Purchases => "purchases",
            EntityKind::Sales => "sales",
            EntityKind::Shops => "shops",
            EntityKind::Suppliers => "suppliers",
            EntityKind::Units => "units",
        }
    }

    fn singular(self) -> &'static str {
        match self {
            EntityKind::Banks => "bank",
            EntityKind::Branches => "branch",
            EntityKind::Customers => "customer",
            EntityKind::Employees => "employee",
            EntityKind::Inventories => "inventory",
            EntityKind::Products => "product",
            EntityKind::Purchases => "purchase",
            EntityKind::Sales => "sale",
            EntityKind::Shops => "shop",
            EntityKind::Suppliers => "supplier",
            EntityKind::Units => "unit",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EntityKind::Banks => "Banks",
            EntityKind::Branches => "Branches",
            EntityKind::Customers => "Customers",
            EntityKind::Employees => "Employees",
            EntityKind::Inventories => "Inventories",
            EntityKind::Products => "Products",
            EntityKind::Purchases => "Purchases",
            EntityKind::Sales => "Sales",
            EntityKind::Shops => "Shops",
            EntityKind::Suppliers => "Suppliers",
            EntityKind::Units => "Units",
        }
    }

    /// Columns a record file for this kind is expected to carry.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            EntityKind::Banks => &["id", "name", "code", "address", "phone"],
            EntityKind::Branches => &["id", "name", "bank", "city", "manager"],
            EntityKind::Customers => &["id", "name", "email", "phone", "address"],
            EntityKind::Employees => &["id", "name", "designation", "email", "phone"],
            EntityKind::Inventories => &["id", "product", "shop", "quantity", "unit"],
            EntityKind::Products => &["id", "name", "sku", "category", "price"],
            EntityKind::Purchases => &["id", "supplier", "product", "quantity", "total", "status"],
            EntityKind::Sales => &["id", "customer", "product", "quantity", "total", "status"],
            EntityKind::Shops => &["id", "name", "location", "manager", "phone"],
            EntityKind::Suppliers => &["id", "name", "contact", "email", "phone"],
            EntityKind::Units => &["id", "name", "symbol"],
        }
    }

    /// Fields searched by the list view unless configured otherwise.
    pub fn default_search_fields(self) -> SearchFields {
        let fields: &[&str] = match self {
            EntityKind::Banks => &["name", "code"],
            EntityKind::Branches => &["name", "bank", "city"],
            EntityKind::Customers => &["name", "email", "phone"],
            EntityKind::Employees => &["name", "designation", "email"],
            EntityKind::Inventories => &["product", "shop"],
            EntityKind::Products => &["name", "sku", "category"],
            EntityKind::Purchases => &["supplier", "product", "status"],
            EntityKind::Sales => &["customer", "product", "status"],
            EntityKind::Shops => &["name", "location"],
            EntityKind::Suppliers => &["name", "contact", "email"],
            EntityKind::Units => &["name", "symbol"],
        };
        SearchFields::only(fields.iter().copied())
    }

    /// Expected columns missing from `columns`.
    pub fn missing_columns(self, columns: &[String]) -> Vec<&'static str> {
        self.columns()
            .iter()
            .copied()
            .filter(|c| !columns.iter().any(|have| have == c))
            .collect()
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    /// Accepts plural or singular names, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        EntityKind::ALL
            .into_iter()
            .find(|k| k.name() == key || k.singular() == key)
            .ok_or_else(|| anyhow!("unknown entity kind: {}", s.trim()))
    }
}

/// One row of a record file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<String>,
}

impl Record {
    /// `values` is expected to line up with `columns`.
    pub fn new(columns: Arc<[String]>, values: Vec<String>) -> Self {
        Self { columns, values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns
            .iter()
            .position(|c| c == column)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

impl Searchable for Record {
    fn text_fields(&self) -> Vec<(&str, Cow<'_, str>)> {
        self.columns
            .iter()
            .zip(&self.values)
            .map(|(c, v)| (c.as_str(), Cow::Borrowed(v.as_str())))
            .collect()
    }

    fn field_text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(Cow::Borrowed)
    }
}

/// Parsed contents of a record file.
#[derive(Clone, Debug)]
pub struct RecordFile {
    pub columns: Arc<[String]>,
    pub records: Vec<Record>,
}

/// Read and parse a record file.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<RecordFile> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let file = parse_records(&contents).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), rows = file.records.len(), "loaded record file");
    Ok(file)
}

/// Parse record file contents.
///
/// `#` comments and blank lines are ignored. Rows with fewer fields than the
/// header are skipped; extra fields are joined back into the last column, so
/// a trailing value may itself contain `:`.
pub fn parse_records(contents: &str) -> Result<RecordFile> {
    let mut lines = contents
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty() && !l.trim_start().starts_with('#'));

    let Some((_, header)) = lines.next() else {
        bail!("record file has no header line");
    };
    let columns: Arc<[String]> = header.split(':').map(|c| c.trim().to_string()).collect();
    if columns.iter().any(|c| c.is_empty()) {
        bail!("empty column name in header: {}", header.trim());
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let parts: Vec<&str> = line.splitn(columns.len(), ':').map(str::trim).collect();
        if parts.len() < columns.len() {
            warn!(
                line = idx + 1,
                fields = parts.len(),
                expected = columns.len(),
                "skipping short row"
            );
            continue;
        }
        let values = parts.into_iter().map(str::to_string).collect();
        records.push(Record::new(Arc::clone(&columns), values));
    }
    Ok(RecordFile { columns, records })
}

/// Replacement dataset without the item at `index`.
///
/// Used after a successful delete; out-of-range indices yield an unchanged copy.
pub fn without_index<T: Clone>(data: &[T], index: usize) -> Arc<[T]> {
    data.iter()
        .enumerate()
        .filter(|(i, _)| *i != index)
        .map(|(_, item)| item.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn tmp_path(tag: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let n = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        p.push(format!("adminlist_rs_{tag}_{}_{}", std::process::id(), n));
        p
    }

    #[test]
    fn parse_records_basic() {
        let data = "\
# banks
id:name:code:address:phone
1:First Bank:FB01:Dhaka:0171

2: Second Bank :SB02:Sylhet:0181
";
        let file = parse_records(data).unwrap();
        assert_eq!(file.columns.len(), 5);
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.records[0].get("name"), Some("First Bank"));
        assert_eq!(file.records[1].get("name"), Some("Second Bank"));
        assert_eq!(file.records[1].get("missing"), None);
    }

    #[test]
    fn parse_records_skips_short_rows() {
        let data = "id:name\n1:ok\n2\n4:fine\n";
        let file = parse_records(data).unwrap();
        let names: Vec<_> = file.records.iter().filter_map(|r| r.get("name")).collect();
        assert_eq!(names, vec!["ok", "fine"]);
    }

    #[test]
    fn parse_records_keeps_colons_in_last_column() {
        let data = "id:name:address\n1:Harbor:Road 5: Block B: Dhaka\n2:Plain:Sylhet\n";
        let file = parse_records(data).unwrap();
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.records[0].get("name"), Some("Harbor"));
        assert_eq!(file.records[0].get("address"), Some("Road 5: Block B: Dhaka"));
        assert_eq!(file.records[1].get("address"), Some("Sylhet"));
    }

    #[test]
    fn parse_records_requires_header() {
        assert!(parse_records("# only a comment\n\n").is_err());
        assert!(parse_records("id::name\n").is_err());
    }

    #[test]
    fn load_dataset_reports_path_on_error() {
        let path = tmp_path("missing");
        let err = load_dataset(&path).unwrap_err();
        assert!(err.to_string().contains(&path.display().to_string()));
        assert!(err.root_cause().downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn load_dataset_reads_file() {
        let path = tmp_path("units");
        fs::write(&path, "id:name:symbol\n1:Kilogram:kg\n2:Litre:l\n").unwrap();
        let file = load_dataset(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(file.records.len(), 2);
        assert_eq!(file.records[1].get("symbol"), Some("l"));
    }

    #[test]
    fn record_search_fields_follow_columns() {
        let file = parse_records("id:name\n7:Harbor\n").unwrap();
        let r = &file.records[0];
        let fields = r.text_fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].0, "name");
        assert_eq!(r.field_text("id").as_deref(), Some("7"));
    }

    #[test]
    fn entity_kind_parses_singular_and_plural() {
        assert_eq!("Banks".parse::<EntityKind>().unwrap(), EntityKind::Banks);
        assert_eq!("inventory".parse::<EntityKind>().unwrap(), EntityKind::Inventories);
        assert_eq!(" branch ".parse::<EntityKind>().unwrap(), EntityKind::Branches);
        assert!("widgets".parse::<EntityKind>().is_err());
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn default_search_fields_are_known_columns() {
        for kind in EntityKind::ALL {
            match kind.default_search_fields() {
                SearchFields::Only(set) => {
                    for f in set {
                        assert!(kind.columns().contains(&f.as_str()), "{kind}: {f}");
                    }
                }
                SearchFields::All => panic!("{kind} has no default search fields"),
            }
        }
    }

    #[test]
    fn missing_columns_lists_absent_ones() {
        let cols = vec!["id".to_string(), "name".to_string()];
        assert_eq!(EntityKind::Units.missing_columns(&cols), vec!["symbol"]);
    }

    #[test]
    fn without_index_removes_one_item() {
        let data = vec![1, 2, 3];
        assert_eq!(&*without_index(&data, 1), &[1, 3]);
        assert_eq!(&*without_index(&data, 9), &[1, 2, 3]);
    }
}
