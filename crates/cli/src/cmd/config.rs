//! `memo config`: inspect and edit `config.toml`

use crate::system_config::{self, KEYS};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// What `memo config` was asked to do; flags are checked in this order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    Example,
    Path { create: bool },
    Get(String),
    Set { key: String, value: String },
    List,
}

impl ConfigAction {
    /// Pick the action from the raw flags; no flag at all lists
    pub fn from_flags(get: Option<String>, set: Option<Vec<String>>, path: bool, create: bool, example: bool) -> Self {
        if example {
            return ConfigAction::Example;
        }
        if path {
            return ConfigAction::Path { create };
        }
        if let Some(key) = get {
            return ConfigAction::Get(key);
        }
        match set.as_deref() {
            Some([key, value]) => ConfigAction::Set {
                key: key.clone(),
                value: value.clone(),
            },
            _ => ConfigAction::List,
        }
    }
}

pub async fn run(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Example => print!("{}", system_config::example_config()),
        ConfigAction::Path { create } => show_path(create)?,
        ConfigAction::Get(key) => println!("{}", system_config::load_unchecked()?.get(&key)?),
        ConfigAction::Set { key, value } => set_value(&key, &value)?,
        ConfigAction::List => list()?,
    }
    Ok(())
}

fn location() -> Result<PathBuf> {
    system_config::config_file_path().context("Could not determine config file path")
}

fn list() -> Result<()> {
    let config = system_config::load_unchecked()?;
    let path = location()?;

    println!("{} {}", "Configuration".bold(), path.display().dimmed());

    let mut section = "";
    for key in KEYS {
        let (prefix, name) = key.split_once('.').unwrap_or(("", key));
        if prefix != section {
            println!("\n{}", format!("[{}]", prefix).yellow());
            section = prefix;
        }
        println!("  {} = {}", name.cyan(), config.get(key)?);
    }

    println!("\n{}", "Allowed values".bold());
    println!("  record_count             0 to 1,000,000");
    println!("  *_quiet_period_ms        0 to 10,000");
    println!("  table_rows               1 to 1,000");
    println!("  level                    trace, debug, info, warn, error");
    Ok(())
}

fn set_value(key: &str, value: &str) -> Result<()> {
    let mut config = system_config::load_unchecked()?;
    config.set(key, value)?;
    config
        .validate()
        .with_context(|| format!("Refusing to set {} = {}", key, value))?;
    system_config::save(&config)?;

    println!("{} {} = {}", "✓".green(), key.cyan(), value);
    Ok(())
}

fn show_path(create: bool) -> Result<()> {
    let path = location()?;
    let existed = path.exists();

    if create && !existed {
        system_config::init_if_missing()?;
        println!("{} wrote defaults to {}", "✓".green(), path.display());
        return Ok(());
    }

    println!("{}", path.display());
    if !existed {
        println!("{}", "(not created yet; pass --create to write defaults)".dimmed());
    }
    Ok(())
}
