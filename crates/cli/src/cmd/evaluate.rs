//! One-shot filter + statistics

use crate::util;
use anyhow::{Context, Result};
use memoscope_core::{Record, RecordSet};
use memoscope_pipeline::{
    sorted, CategoryFilter, FilterParams, Pipeline, SortDirection, SortField, Statistics,
};
use owo_colors::OwoColorize;
use serde::Serialize;

/// Options for `memo evaluate`
#[derive(Debug, Clone)]
pub struct EvaluateOptions {
    pub search: String,
    pub category: CategoryFilter,
    pub sort: Option<SortField>,
    pub direction: SortDirection,
    pub rows: usize,
    pub json: bool,
}

#[derive(Serialize)]
struct EvaluateReport<'a> {
    search: &'a str,
    category: &'a str,
    total_records: usize,
    filtered: &'a [Record],
    statistics: &'a Statistics,
}

pub async fn run(records: &RecordSet, options: EvaluateOptions) -> Result<()> {
    let mut pipeline = Pipeline::new();
    util::check_category(&mut pipeline, records, &options.category)?;

    let params = FilterParams::new(options.search.clone(), options.category.clone());
    let evaluation = pipeline.evaluate(records, &params);

    let rows: Vec<Record> = match options.sort {
        Some(field) => sorted(evaluation.view.rows(), field, options.direction),
        None => evaluation.view.rows().to_vec(),
    };

    if options.json {
        let report = EvaluateReport {
            search: &params.search,
            category: params.category.label(),
            total_records: records.len(),
            filtered: &rows,
            statistics: &evaluation.statistics,
        };
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", text);
        return Ok(());
    }

    println!(
        "{} search={:?} category={}",
        "Filter".bold(),
        params.search,
        params.category.to_string().cyan()
    );
    println!("{} of {} users", evaluation.view.len(), records.len());
    println!();
    util::print_summary(&evaluation.statistics, records.len());
    println!();
    util::print_table(&rows, options.rows);

    Ok(())
}
