//! Explicitly keyed recomputation cache
//!
//! Two cache slots, each holding only the latest entry:
//! - the filtered view, keyed by (record-set id, search, category)
//! - the statistics, keyed by the filtered view's content hash
//!
//! A call whose key matches the stored one returns the stored value without
//! doing any work. There is no eviction beyond replacing the single entry.

use crate::filter::{filter_records, CategoryFilter, FilterParams, FilteredView};
use crate::metrics::PipelineCounters;
use crate::stats::{compute_statistics, Statistics};
use ahash::AHashSet;
use memoscope_core::{ContentHash, Record, RecordSet, RecordSetId};
use std::sync::Arc;
use tracing::debug;

/// Output of one evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub view: Arc<FilteredView>,
    pub statistics: Arc<Statistics>,
    /// The filter pass ran for this call
    pub view_recomputed: bool,
    /// The aggregation ran for this call
    pub statistics_recomputed: bool,
}

/// Evaluate without any caching
///
/// Pure apart from the timing field of the statistics.
pub fn evaluate(records: &[Record], search: &str, category: &CategoryFilter) -> Evaluation {
    let params = FilterParams::new(search, category.clone());
    let view = filter_records(records, &params);
    let statistics = compute_statistics(view.rows());

    Evaluation {
        view: Arc::new(view),
        statistics: Arc::new(statistics),
        view_recomputed: true,
        statistics_recomputed: true,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewKey {
    set: RecordSetId,
    params: FilterParams,
}

/// Memoized filter-and-aggregate pipeline
#[derive(Debug, Default)]
pub struct Pipeline {
    view_slot: Option<(ViewKey, Arc<FilteredView>)>,
    stats_slot: Option<(ContentHash, Arc<Statistics>)>,
    categories_slot: Option<(RecordSetId, Arc<[CategoryFilter]>)>,
    counters: Arc<PipelineCounters>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share counters with an observer (e.g. a status line)
    pub fn with_counters(counters: Arc<PipelineCounters>) -> Self {
        Self {
            counters,
            ..Self::default()
        }
    }

    pub fn counters(&self) -> &Arc<PipelineCounters> {
        &self.counters
    }

    /// Filter and aggregate, reusing whatever is still valid
    pub fn evaluate(&mut self, records: &RecordSet, params: &FilterParams) -> Evaluation {
        self.counters.evaluations.record();

        let (view, view_recomputed) = self.view_for(records, params);
        let (statistics, statistics_recomputed) = self.statistics_for(&view);

        Evaluation {
            view,
            statistics,
            view_recomputed,
            statistics_recomputed,
        }
    }

    fn view_for(&mut self, records: &RecordSet, params: &FilterParams) -> (Arc<FilteredView>, bool) {
        if let Some((key, view)) = &self.view_slot {
            if key.set == records.id() && key.params == *params {
                return (Arc::clone(view), false);
            }
        }

        self.counters.filter_runs.record();
        let view = Arc::new(filter_records(records, params));
        debug!(
            set = %records.id(),
            search = %params.search,
            category = %params.category,
            rows = view.len(),
            "Filtered records"
        );

        let key = ViewKey {
            set: records.id(),
            params: params.clone(),
        };
        self.view_slot = Some((key, Arc::clone(&view)));
        (view, true)
    }

    fn statistics_for(&mut self, view: &FilteredView) -> (Arc<Statistics>, bool) {
        let hash = view.content_hash();
        if let Some((key, statistics)) = &self.stats_slot {
            if *key == hash {
                return (Arc::clone(statistics), false);
            }
        }

        self.counters.stats_runs.record();
        let statistics = Arc::new(compute_statistics(view.rows()));
        debug!(
            view = %hash.short(),
            count = statistics.count,
            elapsed = ?statistics.elapsed,
            "Calculated statistics"
        );

        self.stats_slot = Some((hash, Arc::clone(&statistics)));
        (statistics, true)
    }

    /// `All` followed by every distinct category in first-seen order
    ///
    /// Recomputed only when the record set changes.
    pub fn categories(&mut self, records: &RecordSet) -> Arc<[CategoryFilter]> {
        if let Some((set, categories)) = &self.categories_slot {
            if *set == records.id() {
                return Arc::clone(categories);
            }
        }

        self.counters.category_runs.record();
        let categories: Arc<[CategoryFilter]> = distinct_categories(records).into();
        self.categories_slot = Some((records.id(), Arc::clone(&categories)));
        categories
    }

    /// Drop every cached entry
    pub fn invalidate(&mut self) {
        self.view_slot = None;
        self.stats_slot = None;
        self.categories_slot = None;
    }
}

fn distinct_categories(records: &[Record]) -> Vec<CategoryFilter> {
    let mut seen = AHashSet::new();
    let mut out = vec![CategoryFilter::All];
    for record in records {
        if seen.insert(record.category.as_str()) {
            out.push(CategoryFilter::Only(record.category.clone()));
        }
    }
    out
}
