//! Shared utilities for CLI commands

use crate::system_config::SystemConfig;
use anyhow::Result;
use memoscope_core::{generate_records, GeneratorConfig, Record, RecordSet};
use memoscope_pipeline::{CategoryFilter, CounterSnapshot, Pipeline, Statistics};
use owo_colors::OwoColorize;
use std::time::Duration;
use tracing::info;

/// Generate the session's record set from config plus CLI overrides
pub fn build_records(config: &SystemConfig, count: Option<usize>, seed: Option<u64>) -> RecordSet {
    let generator = GeneratorConfig {
        count: count.unwrap_or(config.data.record_count),
        seed: seed.or(config.data.seed),
        today: None,
    };
    let records = generate_records(&generator);
    info!(
        count = records.len(),
        seed = ?generator.seed,
        set = %records.id(),
        "Generated records"
    );
    records
}

/// Reject categories that do not occur in the table
pub fn check_category(
    pipeline: &mut Pipeline,
    records: &RecordSet,
    category: &CategoryFilter,
) -> Result<()> {
    let known = pipeline.categories(records);
    if known.contains(category) {
        return Ok(());
    }
    let labels: Vec<&str> = known.iter().map(|c| c.label()).collect();
    anyhow::bail!("Unknown category '{}'. Known: {}", category, labels.join(", "))
}

/// Format an amount with thousands separators ("$1,234,567")
pub fn format_money(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    out.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Round then format as money
pub fn format_average(amount: f64) -> String {
    format_money(amount.round() as u64)
}

/// Milliseconds with two decimals ("0.42ms")
pub fn format_elapsed(elapsed: Duration) -> String {
    format!("{:.2}ms", elapsed.as_secs_f64() * 1000.0)
}

/// Truncate to `width` characters, marking the cut with "…"
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

/// The four summary tiles plus per-category lines
pub fn print_summary(stats: &Statistics, total_records: usize) {
    println!("{}", "Statistics".bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Employees:     {} of {}",
        stats.count.to_string().cyan(),
        total_records
    );
    println!("Avg salary:    {}", format_money(stats.mean).green());
    println!("Median salary: {}", format_money(stats.median_rounded()).magenta());
    println!("Total:         {}", format_money(stats.sum));
    println!("Calc time:     {}", format_elapsed(stats.elapsed).dimmed());

    if !stats.per_category.is_empty() {
        println!();
        println!("By department:");
        for entry in &stats.per_category {
            println!(
                "  {:<18} {:>4}  avg {}",
                entry.category,
                entry.count,
                format_average(entry.average)
            );
        }
    }
}

/// Table of the first `max_rows` rows
pub fn print_table(rows: &[Record], max_rows: usize) {
    println!(
        "{}",
        format!(
            "{:<5} {:<22} {:<34} {:<18} {:>10}  {}",
            "ID", "NAME", "EMAIL", "DEPARTMENT", "SALARY", "JOINED"
        )
        .dimmed()
    );
    for row in rows.iter().take(max_rows) {
        println!(
            "{:<5} {:<22} {:<34} {:<18} {:>10}  {}",
            row.id.0,
            truncate(&row.name, 22),
            truncate(&row.email, 34),
            truncate(&row.category, 18),
            format_money(row.magnitude),
            row.joined
        );
    }
    if rows.len() > max_rows {
        println!(
            "{}",
            format!("Showing {} of {} results", max_rows, rows.len()).dimmed()
        );
    }
    if rows.is_empty() {
        println!("{}", "No matching rows".dimmed());
    }
}

/// One line of counters ("evaluations 3 · filter 2 · stats 2 · categories 1")
pub fn format_counters(snapshot: &CounterSnapshot) -> String {
    format!(
        "evaluations {} · filter {} · stats {} · categories {}",
        snapshot.evaluations, snapshot.filter_runs, snapshot.stats_runs, snapshot.category_runs
    )
}
