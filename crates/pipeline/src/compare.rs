//! Memoized vs naive side-by-side run
//!
//! Simulates a component that re-renders `ticks` times for reasons unrelated
//! to filtering (a "force re-render" button). The memoized pipeline should
//! filter and aggregate once; the naive one does it on every tick.

use crate::filter::FilterParams;
use crate::memo::{evaluate, Pipeline};
use crate::metrics::{CounterSnapshot, PipelineCounters};
use memoscope_core::RecordSet;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::info;

/// Outcome of a comparison run
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub ticks: u64,
    pub memoized: CounterSnapshot,
    pub naive: CounterSnapshot,
    pub memoized_elapsed: Duration,
    pub naive_elapsed: Duration,
}

impl ComparisonReport {
    /// Filter + aggregation passes the cache avoided
    pub fn runs_saved(&self) -> u64 {
        (self.naive.filter_runs + self.naive.stats_runs)
            .saturating_sub(self.memoized.filter_runs + self.memoized.stats_runs)
    }
}

/// Evaluator that recomputes everything on every call
#[derive(Debug, Default)]
pub struct NaiveEvaluator {
    counters: PipelineCounters,
}

impl NaiveEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn evaluate(&self, records: &RecordSet, params: &FilterParams) -> crate::Evaluation {
        self.counters.evaluations.record();
        self.counters.filter_runs.record();
        self.counters.stats_runs.record();
        evaluate(records, &params.search, &params.category)
    }

    pub fn counters(&self) -> &PipelineCounters {
        &self.counters
    }
}

/// Drive both evaluators through `ticks` unrelated re-renders
///
/// `on_tick` is called after each tick with the 1-based tick number.
pub fn run_comparison<F>(
    records: &RecordSet,
    params: &FilterParams,
    ticks: u64,
    mut on_tick: F,
) -> ComparisonReport
where
    F: FnMut(u64),
{
    let mut pipeline = Pipeline::new();
    let naive = NaiveEvaluator::new();
    let mut memoized_elapsed = Duration::ZERO;
    let mut naive_elapsed = Duration::ZERO;

    for tick in 1..=ticks {
        let start = Instant::now();
        pipeline.evaluate(records, params);
        memoized_elapsed += start.elapsed();

        let start = Instant::now();
        naive.evaluate(records, params);
        naive_elapsed += start.elapsed();

        on_tick(tick);
    }

    let report = ComparisonReport {
        ticks,
        memoized: pipeline.counters().snapshot(),
        naive: naive.counters().snapshot(),
        memoized_elapsed,
        naive_elapsed,
    };
    info!(
        ticks,
        saved = report.runs_saved(),
        ?memoized_elapsed,
        ?naive_elapsed,
        "Comparison finished"
    );
    report
}
