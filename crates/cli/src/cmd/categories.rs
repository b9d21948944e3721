//! List the category selector options

use crate::util;
use anyhow::Result;
use memoscope_core::RecordSet;
use memoscope_pipeline::{CategoryFilter, FilterParams, Pipeline};
use owo_colors::OwoColorize;

pub async fn run(records: &RecordSet) -> Result<()> {
    let mut pipeline = Pipeline::new();
    let categories = pipeline.categories(records);
    let everything = pipeline.evaluate(records, &FilterParams::default());

    println!("{}", "Categories".bold());
    for category in categories.iter() {
        match category {
            CategoryFilter::All => {
                println!("  {:<18} {:>4}", category.label().cyan(), records.len());
            }
            CategoryFilter::Only(label) => {
                let (count, average) = everything
                    .statistics
                    .category(label)
                    .map(|entry| (entry.count, entry.average))
                    .unwrap_or((0, 0.0));
                println!(
                    "  {:<18} {:>4}  avg {}",
                    label,
                    count,
                    util::format_average(average)
                );
            }
        }
    }
    Ok(())
}
