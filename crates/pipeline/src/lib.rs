//! Filter-and-aggregate pipeline
//!
//! This crate provides:
//! - Search and category filtering into a content-hashed view
//! - Summary statistics (count, sum, mean, median, per-category averages)
//! - An explicit two-slot memo cache that skips work on unrelated re-renders
//! - Invocation counters, display sorting and a memoized-vs-naive comparison

pub mod compare;
pub mod filter;
pub mod memo;
pub mod metrics;
pub mod sort;
pub mod stats;

// Re-exports
pub use compare::{run_comparison, ComparisonReport, NaiveEvaluator};
pub use filter::{filter_records, CategoryFilter, FilterParams, FilteredView};
pub use memo::{evaluate, Evaluation, Pipeline};
pub use metrics::{CounterSnapshot, InvocationCounter, PipelineCounters};
pub use sort::{sorted, SortDirection, SortField};
pub use stats::{compute_statistics, CategoryBreakdown, Statistics};
