//! Print the generated table

use crate::util;
use anyhow::{Context, Result};
use memoscope_core::RecordSet;
use owo_colors::OwoColorize;

pub async fn run(records: &RecordSet, json: bool) -> Result<()> {
    if json {
        let text = serde_json::to_string_pretty(records.records())
            .context("Failed to serialize records")?;
        println!("{}", text);
        return Ok(());
    }

    println!("{} ({} rows)", "Generated records".bold(), records.len());
    println!();
    util::print_table(records.records(), records.len());
    Ok(())
}
