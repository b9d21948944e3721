//! config

use crate::common::TestEnv;
use crate::memo;
use anyhow::Result;

#[test]
fn test_set_then_get_round_trips() -> Result<()> {
    let env = TestEnv::new()?;
    memo!(env.config_path(), "config", "--set", "display.table_rows", "3").assert_success()?;
    assert!(env.config_path().exists());

    let result = memo!(env.config_path(), "config", "--get", "display.table_rows").assert_success()?;
    assert_eq!(result.stdout.trim(), "3");
    Ok(())
}

#[test]
fn test_out_of_range_value_is_not_saved() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "config", "--set", "display.table_rows", "0").assert_failure()?;
    assert!(result.contains_stderr("out of range"), "{}", result.stderr);
    assert!(!env.config_path().exists());
    Ok(())
}

#[test]
fn test_unknown_key_fails() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "config", "--get", "data.colour").assert_failure()?;
    assert!(result.contains_stderr("Unknown config key"));
    Ok(())
}

#[test]
fn test_configured_seed_is_used() -> Result<()> {
    let env = TestEnv::new()?;
    memo!(env.config_path(), "config", "--set", "data.seed", "21").assert_success()?;
    memo!(env.config_path(), "config", "--set", "data.record_count", "15").assert_success()?;

    let from_config = memo!(env.config_path(), "generate", "--json").assert_success()?.json()?;
    let from_flags = memo!(env.config_path(), "--seed", "21", "--count", "15", "generate", "--json")
        .assert_success()?
        .json()?;
    assert_eq!(from_config, from_flags);
    Ok(())
}

#[test]
fn test_path_create_writes_defaults() -> Result<()> {
    let env = TestEnv::new()?;
    memo!(env.config_path(), "config", "--path", "--create").assert_success()?;
    let text = std::fs::read_to_string(env.config_path())?;
    assert!(text.contains("search_quiet_period_ms = 300"), "{text}");
    Ok(())
}

#[test]
fn test_invalid_file_can_be_repaired() -> Result<()> {
    let env = TestEnv::new()?;
    if let Some(parent) = env.config_path().parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(env.config_path(), "[display]\ntable_rows = 0\n")?;

    let result = memo!(env.config_path(), "--seed", "1", "categories").assert_failure()?;
    assert!(result.contains_stderr("out of range"), "{}", result.stderr);

    memo!(env.config_path(), "config", "--path").assert_success()?;
    memo!(env.config_path(), "config", "--example").assert_success()?;
    memo!(env.config_path(), "config", "--list").assert_success()?;
    let result = memo!(env.config_path(), "config", "--get", "display.table_rows").assert_success()?;
    assert_eq!(result.stdout.trim(), "0");

    memo!(env.config_path(), "config", "--set", "display.table_rows", "5").assert_success()?;
    let result = memo!(env.config_path(), "config", "--get", "display.table_rows").assert_success()?;
    assert_eq!(result.stdout.trim(), "5");

    memo!(env.config_path(), "--seed", "1", "categories").assert_success()?;
    Ok(())
}
