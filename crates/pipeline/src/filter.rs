//! Search and category filtering

use memoscope_core::{ContentHash, IncrementalHasher, Record};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category restriction
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryFilter {
    /// No restriction (spelled `all`)
    All,
    /// Exact, case-sensitive category label
    Only(String),
}

impl CategoryFilter {
    /// Spelling of the "no restriction" sentinel
    pub const SENTINEL: &'static str = "all";

    /// Whether a record with `category` passes this filter
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => label == category,
        }
    }

    /// Label as shown in a selector
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => Self::SENTINEL,
            CategoryFilter::Only(label) => label,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::SENTINEL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settled search text plus category restriction
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterParams {
    /// Case-insensitive substring matched against name and email
    pub search: String,
    /// Category restriction
    pub category: CategoryFilter,
}

impl FilterParams {
    pub fn new(search: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    /// Whether a single record passes both predicates
    pub fn matches(&self, record: &Record) -> bool {
        self.category.matches(&record.category)
            && matches_search(record, &self.search.to_lowercase())
    }
}

/// Search predicate; `needle` must already be lowercased
pub fn matches_search(record: &Record, needle: &str) -> bool {
    needle.is_empty()
        || record.name.to_lowercase().contains(needle)
        || record.email.to_lowercase().contains(needle)
}

/// Rows matching the current filter, in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilteredView {
    rows: Vec<Record>,
    content_hash: ContentHash,
}

impl FilteredView {
    /// Build a view and hash its contents
    pub fn from_rows(rows: Vec<Record>) -> Self {
        let mut hasher = IncrementalHasher::new();
        hasher.update_u64(rows.len() as u64);
        for row in &rows {
            row.hash_into(&mut hasher);
        }
        Self {
            content_hash: hasher.finalize(),
            rows,
        }
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity of the view's contents
    pub fn content_hash(&self) -> ContentHash {
        self.content_hash
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a FilteredView {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Single stable left-to-right pass over `records`
pub fn filter_records(records: &[Record], params: &FilterParams) -> FilteredView {
    let needle = params.search.to_lowercase();
    let rows = records
        .iter()
        .filter(|record| params.category.matches(&record.category))
        .filter(|record| matches_search(record, &needle))
        .cloned()
        .collect();

    FilteredView::from_rows(rows)
}
