//! generate / evaluate / categories

use crate::common::TestEnv;
use crate::memo;
use anyhow::Result;

#[test]
fn test_evaluate_json_is_consistent() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "120", "--seed", "7", "evaluate", "--search", "a", "--json")
        .assert_success()?;
    let report = result.json()?;

    assert_eq!(report["total_records"], 120);
    assert_eq!(report["search"], "a");
    assert_eq!(report["category"], "all");

    let filtered = report["filtered"].as_array().expect("filtered array");
    assert_eq!(report["statistics"]["count"].as_u64(), Some(filtered.len() as u64));

    let mut sum = 0;
    for row in filtered {
        let name = row["name"].as_str().unwrap_or_default().to_lowercase();
        let email = row["email"].as_str().unwrap_or_default().to_lowercase();
        assert!(name.contains('a') || email.contains('a'), "{row}");
        sum += row["magnitude"].as_u64().expect("magnitude");
    }
    assert_eq!(report["statistics"]["sum"].as_u64(), Some(sum));
    Ok(())
}

#[test]
fn test_same_seed_generates_same_table() -> Result<()> {
    let env = TestEnv::new()?;
    let first = memo!(env.config_path(), "--count", "30", "--seed", "99", "generate", "--json")
        .assert_success()?
        .json()?;
    let second = memo!(env.config_path(), "--count", "30", "--seed", "99", "generate", "--json")
        .assert_success()?
        .json()?;

    assert_eq!(first.as_array().map(Vec::len), Some(30));
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_category_filter_keeps_only_that_category() -> Result<()> {
    let env = TestEnv::new()?;
    let all = memo!(env.config_path(), "--count", "200", "--seed", "3", "evaluate", "--json")
        .assert_success()?
        .json()?;
    let first_category = all["filtered"][0]["category"]
        .as_str()
        .expect("category")
        .to_string();

    let only = memo!(
        env.config_path(),
        "--count", "200", "--seed", "3",
        "evaluate", "--category", &first_category, "--json"
    )
    .assert_success()?
    .json()?;

    let rows = only["filtered"].as_array().expect("filtered array");
    assert!(!rows.is_empty());
    assert!(rows.iter().all(|row| row["category"] == first_category.as_str()));
    Ok(())
}

#[test]
fn test_unknown_category_is_rejected() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--seed", "1", "evaluate", "--category", "Astronauts")
        .assert_failure()?;
    assert!(result.contains_stderr("Unknown category"));
    Ok(())
}

#[test]
fn test_count_above_limit_is_rejected() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "1000001", "evaluate", "--json").assert_failure()?;
    assert!(result.contains_stderr("--count"), "{}", result.stderr);
    Ok(())
}

#[test]
fn test_empty_table_yields_zeroed_statistics() -> Result<()> {
    let env = TestEnv::new()?;
    let report = memo!(env.config_path(), "--count", "0", "evaluate", "--json")
        .assert_success()?
        .json()?;

    assert_eq!(report["statistics"]["count"], 0);
    assert_eq!(report["statistics"]["mean"], 0);
    assert_eq!(report["statistics"]["median"].as_f64(), Some(0.0));
    Ok(())
}

#[test]
fn test_categories_lists_all_first() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "50", "--seed", "5", "categories").assert_success()?;
    let first_option = result
        .stdout
        .lines()
        .nth(1)
        .map(str::trim)
        .unwrap_or_default()
        .to_string();
    assert!(first_option.contains("all"), "{}", result.stdout);
    Ok(())
}
