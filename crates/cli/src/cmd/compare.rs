//! Memoized vs naive evaluation under unrelated re-renders

use crate::util;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use memoscope_core::RecordSet;
use memoscope_pipeline::{run_comparison, FilterParams, Pipeline};
use owo_colors::OwoColorize;

pub async fn run(records: &RecordSet, params: FilterParams, ticks: u64, json: bool) -> Result<()> {
    util::check_category(&mut Pipeline::new(), records, &params.category)?;

    let progress = if json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(ticks)
    };
    progress.set_style(
        ProgressStyle::with_template("{spinner} re-render {pos}/{len} [{bar:30}] {elapsed_precise}")
            .context("Invalid progress template")?
            .progress_chars("=> "),
    );

    let report = run_comparison(records, &params, ticks, |_| progress.inc(1));
    progress.finish_and_clear();

    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{}", "Memoized vs naive".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Forced re-renders: {}  (search={:?}, category={})",
        report.ticks, params.search, params.category
    );
    println!();
    println!(
        "{}  {}  {}",
        "With memo:   ".green(),
        util::format_counters(&report.memoized),
        util::format_elapsed(report.memoized_elapsed).dimmed()
    );
    println!(
        "{}  {}  {}",
        "Without memo:".red(),
        util::format_counters(&report.naive),
        util::format_elapsed(report.naive_elapsed).dimmed()
    );
    println!();
    println!("Recomputations avoided: {}", report.runs_saved().to_string().bold());

    Ok(())
}
