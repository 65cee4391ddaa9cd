#![forbid(unsafe_code)]

//! Product catalog input.
//!
//! The catalog is the one external data surface: an ordered sequence of
//! records supplied by the host (typically as JSON). Both the menu model and
//! the carousel consume it, independently. Validation happens once at load:
//! records missing a required field are skipped with a diagnostic so a bad
//! record degrades the view instead of breaking it, and consumers that need
//! content decide for themselves what an empty catalog means.

use std::fmt;

use serde::Deserialize;

use vitrine_core::warn;

/// One record from the host's product data source.
///
/// `id`, `name`, and `description_short` are required and must be non-blank;
/// the rest is optional decoration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogRecord {
    /// Stable identity, unique within the catalog.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short free-text description, bullet-delimited with `•`.
    pub description_short: String,

    /// Small classification badge (e.g. a fuel kind).
    #[serde(default)]
    pub meta: Option<String>,

    /// Explicit link target; consumers generate an anchor when absent.
    #[serde(default)]
    pub link: Option<String>,
}

impl CatalogRecord {
    fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && !self.description_short.trim().is_empty()
    }
}

/// A validated, ordered catalog.
///
/// Construction filters malformed and duplicate-id records; what remains is
/// immutable and safe for every consumer.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<CatalogRecord>,
}

impl Catalog {
    /// Build a catalog from pre-parsed records, preserving order.
    ///
    /// Malformed records (blank required field) and records repeating an
    /// earlier id are skipped with a `warn!` diagnostic.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        let mut kept: Vec<CatalogRecord> = Vec::new();
        for record in records {
            if !record.is_well_formed() {
                warn!(id = %record.id, "skipping malformed catalog record");
                continue;
            }
            if kept.iter().any(|r| r.id == record.id) {
                warn!(id = %record.id, "skipping catalog record with duplicate id");
                continue;
            }
            kept.push(record);
        }
        Self { records: kept }
    }

    /// Parse a JSON array of records and build a catalog from it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// The surviving records, in input order.
    #[must_use]
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Whether nothing survived validation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of valid records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// The records, or [`CatalogError::Empty`] when nothing survived
    /// validation. For consumers that cannot render without content.
    pub fn require_content(&self) -> Result<&[CatalogRecord], CatalogError> {
        if self.records.is_empty() {
            Err(CatalogError::Empty)
        } else {
            Ok(&self.records)
        }
    }
}

/// Catalog loading failure.
#[derive(Debug)]
pub enum CatalogError {
    /// The input was not a well-formed JSON array of records.
    Parse(serde_json::Error),

    /// No record survived validation.
    Empty,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "catalog parse error: {err}"),
            Self::Empty => write!(f, "catalog contains no valid records"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Empty => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, desc: &str) -> CatalogRecord {
        CatalogRecord {
            id: id.to_string(),
            name: name.to_string(),
            description_short: desc.to_string(),
            meta: None,
            link: None,
        }
    }

    #[test]
    fn keeps_valid_records_in_order() {
        let c = Catalog::from_records([
            record("summer", "Summer", "dry grip • low noise"),
            record("winter", "Winter", "ice grip"),
        ]);
        assert_eq!(c.len(), 2);
        assert_eq!(c.records()[0].id, "summer");
        assert_eq!(c.records()[1].id, "winter");
    }

    #[test]
    fn skips_blank_required_fields() {
        let c = Catalog::from_records([
            record("", "Nameless", "desc"),
            record("ok", "  ", "desc"),
            record("ok2", "Name", "   "),
            record("good", "Good", "desc"),
        ]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.records()[0].id, "good");
    }

    #[test]
    fn skips_duplicate_ids_keeping_first() {
        let c = Catalog::from_records([
            record("a", "First", "one"),
            record("a", "Second", "two"),
        ]);
        assert_eq!(c.len(), 1);
        assert_eq!(c.records()[0].name, "First");
    }

    #[test]
    fn parses_json_with_optional_fields() {
        let json = r#"[
            {"id": "all-season", "name": "All Season", "description_short": "a • b", "meta": "Touring"},
            {"id": "sport", "name": "Sport", "description_short": "c", "link": "#sport"}
        ]"#;
        let c = Catalog::from_json(json).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.records()[0].meta.as_deref(), Some("Touring"));
        assert_eq!(c.records()[1].link.as_deref(), Some("#sport"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Catalog::from_json("{\"not\": \"an array\"}").unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[test]
    fn all_invalid_input_yields_empty_catalog() {
        let c = Catalog::from_records([record("", "", "")]);
        assert!(c.is_empty());
    }
}
