//! Interactive debounced search session
//!
//! Reads commands from stdin, one per line:
//! - `<text>`     replace the search text (typed key by key when an interval is set)
//! - `:cat NAME`  change the category (`:cat all` or a bare `:cat` clears it);
//!   unknown names are reported and ignored
//! - `:tick`      force a re-render unrelated to filtering
//! - `:quit`      exit
//!
//! Search text and category each go through a [`Debouncer`]; the pipeline
//! only sees settled values. Ticks re-render immediately.

use crate::util;
use anyhow::{Context, Result};
use memoscope_core::RecordSet;
use memoscope_pipeline::{CategoryFilter, FilterParams, Pipeline};
use memoscope_watcher::Debouncer;
use owo_colors::OwoColorize;
use std::collections::VecDeque;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Session settings
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Quiet period for search text
    pub quiet_period: Duration,
    /// Quiet period for category changes
    pub category_quiet_period: Duration,
    pub keystroke_interval: Duration,
    pub rows: usize,
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Search(String),
    Category(CategoryFilter),
    Tick,
    Quit,
}

/// Parse one stdin line
pub fn parse_input(line: &str) -> Input {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    match trimmed.trim() {
        ":quit" | ":q" => return Input::Quit,
        ":tick" => return Input::Tick,
        _ => {}
    }
    let command = trimmed.trim();
    if command == ":cat" || command.starts_with(":cat ") {
        let name = command[":cat".len()..].trim();
        let category = if name.is_empty() {
            CategoryFilter::All
        } else {
            name.parse().unwrap_or(CategoryFilter::All)
        };
        return Input::Category(category);
    }
    Input::Search(trimmed.to_string())
}

/// Intermediate texts a user would produce going from `from` to `to`
///
/// Backspaces down to the common prefix, then types the rest. Always ends
/// with `to`; empty when nothing changes.
pub fn keystrokes(from: &str, to: &str) -> Vec<String> {
    let common = from
        .chars()
        .zip(to.chars())
        .take_while(|(a, b)| a == b)
        .count();

    let mut steps = Vec::new();
    let mut current: Vec<char> = from.chars().collect();
    while current.len() > common {
        current.pop();
        steps.push(current.iter().collect());
    }
    for ch in to.chars().skip(common) {
        current.push(ch);
        steps.push(current.iter().collect());
    }
    steps
}

struct Session<'a> {
    records: &'a RecordSet,
    pipeline: Pipeline,
    category: CategoryFilter,
    rows: usize,
    renders: u64,
}

impl Session<'_> {
    fn render(&mut self, search: &str, reason: &str) {
        self.renders += 1;
        let params = FilterParams::new(search, self.category.clone());
        let evaluation = self.pipeline.evaluate(self.records, &params);
        let stats = &evaluation.statistics;

        let cache = match (evaluation.view_recomputed, evaluation.statistics_recomputed) {
            (false, false) => "cached".green().to_string(),
            (true, false) => "filtered, stats cached".yellow().to_string(),
            _ => "recomputed".red().to_string(),
        };

        println!(
            "{} #{} ({}) search={:?} category={} -> {} of {} | avg {} | median {} | {}",
            "render".bold(),
            self.renders,
            reason,
            search,
            self.category,
            stats.count,
            self.records.len(),
            util::format_money(stats.mean),
            util::format_money(stats.median_rounded()),
            cache
        );
        for row in evaluation.view.iter().take(self.rows) {
            println!("    {:<5} {:<22} {}", row.id.0, row.name, row.category.dimmed());
        }
    }
}

pub async fn run(records: &RecordSet, options: SessionOptions) -> Result<()> {
    let mut session = Session {
        records,
        pipeline: Pipeline::new(),
        category: CategoryFilter::All,
        rows: options.rows,
        renders: 0,
    };
    let mut search = Debouncer::with_quiet_period(String::new(), options.quiet_period);
    let mut search_rx = search.subscribe();
    let mut category = Debouncer::with_quiet_period(CategoryFilter::All, options.category_quiet_period);
    let mut category_rx = category.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    // Keystrokes not yet delivered to the search debouncer
    let mut queue: VecDeque<String> = VecDeque::new();
    let keystroke = tokio::time::sleep(Duration::ZERO);
    tokio::pin!(keystroke);
    let mut stdin_open = true;

    info!(
        quiet_period = ?options.quiet_period,
        category_quiet_period = ?options.category_quiet_period,
        keystroke_interval = ?options.keystroke_interval,
        "Session started"
    );
    session.render("", "initial");

    loop {
        tokio::select! {
            line = lines.next_line(), if stdin_open => {
                match line.context("Failed to read stdin")? {
                    None => {
                        debug!("stdin closed");
                        stdin_open = false;
                    }
                    Some(line) => match parse_input(&line) {
                        Input::Quit => break,
                        Input::Tick => {
                            let text = search.settled();
                            session.render(&text, "tick");
                        }
                        Input::Category(next) => {
                            match util::check_category(&mut session.pipeline, records, &next) {
                                Ok(()) => {
                                    category.settle(next);
                                }
                                Err(err) => {
                                    warn!(category = %next, "Ignoring category change");
                                    println!("{} {}", "!".yellow(), err);
                                }
                            }
                        }
                        Input::Search(text) => {
                            let from = queue.back().cloned().unwrap_or_else(|| search.source().clone());
                            let was_idle = queue.is_empty();
                            if options.keystroke_interval.is_zero() {
                                queue.push_back(text);
                            } else {
                                queue.extend(keystrokes(&from, &text));
                            }
                            if was_idle {
                                keystroke.as_mut().reset(Instant::now());
                            }
                        }
                    },
                }
            }
            () = &mut keystroke, if !queue.is_empty() => {
                if let Some(text) = queue.pop_front() {
                    debug!(text = %text, "keystroke");
                    search.settle(text);
                }
                if !queue.is_empty() {
                    keystroke.as_mut().reset(Instant::now() + options.keystroke_interval);
                }
            }
            changed = search_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = search_rx.borrow_and_update().clone();
                session.render(&text, "settled");
            }
            changed = category_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                session.category = category_rx.borrow_and_update().clone();
                let text = search.settled();
                session.render(&text, "category");
            }
        }

        // After EOF, run until every queued keystroke has settled and rendered
        let idle = queue.is_empty()
            && !search.is_pending()
            && !category.is_pending()
            && !search_rx.has_changed().unwrap_or(false)
            && !category_rx.has_changed().unwrap_or(false);
        if !stdin_open && idle {
            break;
        }
    }

    let snapshot = session.pipeline.counters().snapshot();
    println!();
    println!("{}", "Session summary".bold());
    println!("  renders:       {}", session.renders);
    println!(
        "  settle events: {} search, {} category",
        search.settle_count(),
        category.settle_count()
    );
    println!("  {}", util::format_counters(&snapshot));
    info!(renders = session.renders, "Session finished");

    Ok(())
}
