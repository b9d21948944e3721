//! Summary statistics over a filtered view

use ahash::AHashMap;
use memoscope_core::Record;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Per-category slice of the summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub count: usize,
    pub total: u64,
    /// `total / count`
    pub average: f64,
}

/// Aggregate description of a filtered view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub count: usize,
    pub sum: u64,
    /// `sum / count` rounded half up; 0 for an empty view
    pub mean: u64,
    /// Exact median; 0 for an empty view
    pub median: f64,
    /// One entry per category present, in first-seen order
    pub per_category: Vec<CategoryBreakdown>,
    /// Time spent aggregating (display only)
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl Statistics {
    /// Summary of an empty view
    pub fn empty() -> Self {
        Self {
            count: 0,
            sum: 0,
            mean: 0,
            median: 0.0,
            per_category: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    /// Median rounded half up for display
    pub fn median_rounded(&self) -> u64 {
        self.median.round() as u64
    }

    /// Equality ignoring the timing field
    pub fn same_values(&self, other: &Statistics) -> bool {
        self.count == other.count
            && self.sum == other.sum
            && self.mean == other.mean
            && self.median == other.median
            && self.per_category == other.per_category
    }

    /// Lookup a category's breakdown
    pub fn category(&self, name: &str) -> Option<&CategoryBreakdown> {
        self.per_category.iter().find(|entry| entry.category == name)
    }
}

fn serialize_millis<S: serde::Serializer>(elapsed: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

/// Aggregate sum, mean, median and per-category averages
pub fn compute_statistics(rows: &[Record]) -> Statistics {
    let start = Instant::now();
    if rows.is_empty() {
        return Statistics {
            elapsed: start.elapsed(),
            ..Statistics::empty()
        };
    }

    let count = rows.len();
    let sum: u64 = rows.iter().map(|r| r.magnitude).sum();

    let mut magnitudes: Vec<u64> = rows.iter().map(|r| r.magnitude).collect();
    let median = median(&mut magnitudes);

    Statistics {
        count,
        sum,
        mean: rounded_mean(sum, count),
        median,
        per_category: group_by_category(rows),
        elapsed: start.elapsed(),
    }
}

/// `sum / count` rounded half up, 0 when `count` is 0
pub fn rounded_mean(sum: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    let count = count as u64;
    (sum + count / 2) / count
}

/// Sorts `values` in place and returns the median (0 when empty)
pub fn median(values: &mut [u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();

    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}

fn group_by_category(rows: &[Record]) -> Vec<CategoryBreakdown> {
    let mut slots: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<CategoryBreakdown> = Vec::new();

    for row in rows {
        let slot = *slots.entry(row.category.as_str()).or_insert_with(|| {
            groups.push(CategoryBreakdown {
                category: row.category.clone(),
                count: 0,
                total: 0,
                average: 0.0,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.count += 1;
        group.total += row.magnitude;
    }

    for group in &mut groups {
        group.average = group.total as f64 / group.count as f64;
    }
    groups
}
