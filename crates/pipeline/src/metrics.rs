//! Invocation counters
//!
//! Stand-in for render-count badges: every stage bumps its counter when it
//! actually does work, so a cache hit is visible as a counter that did not
//! move.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Monotonic counter for one named stage
#[derive(Debug)]
pub struct InvocationCounter {
    name: &'static str,
    count: AtomicU64,
}

impl InvocationCounter {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            count: AtomicU64::new(0),
        }
    }

    /// Count one invocation and return the new total
    pub fn record(&self) -> u64 {
        let count = self.count.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(stage = self.name, count, "stage ran");
        count
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Counters for every pipeline stage
#[derive(Debug)]
pub struct PipelineCounters {
    /// Calls to evaluate, hit or miss
    pub evaluations: InvocationCounter,
    /// Filter passes actually executed
    pub filter_runs: InvocationCounter,
    /// Aggregations actually executed
    pub stats_runs: InvocationCounter,
    /// Category list derivations actually executed
    pub category_runs: InvocationCounter,
}

impl PipelineCounters {
    pub const fn new() -> Self {
        Self {
            evaluations: InvocationCounter::new("evaluate"),
            filter_runs: InvocationCounter::new("filter"),
            stats_runs: InvocationCounter::new("statistics"),
            category_runs: InvocationCounter::new("categories"),
        }
    }

    /// Point-in-time copy of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            evaluations: self.evaluations.get(),
            filter_runs: self.filter_runs.get(),
            stats_runs: self.stats_runs.get(),
            category_runs: self.category_runs.get(),
        }
    }

    pub fn reset(&self) {
        self.evaluations.reset();
        self.filter_runs.reset();
        self.stats_runs.reset();
        self.category_runs.reset();
    }
}

impl Default for PipelineCounters {
    fn default() -> Self {
        Self::new()
    }
}

/// Plain copy of [`PipelineCounters`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CounterSnapshot {
    pub evaluations: u64,
    pub filter_runs: u64,
    pub stats_runs: u64,
    pub category_runs: u64,
}

impl CounterSnapshot {
    /// Evaluations that did no filtering work
    pub fn cache_hits(&self) -> u64 {
        self.evaluations.saturating_sub(self.filter_runs)
    }
}
