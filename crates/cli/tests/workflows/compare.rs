//! compare

use crate::common::TestEnv;
use crate::memo;
use anyhow::Result;

#[test]
fn test_memoized_pipeline_runs_once() -> Result<()> {
    let env = TestEnv::new()?;
    let report = memo!(env.config_path(), "--count", "80", "--seed", "11", "compare", "--ticks", "25", "--json")
        .assert_success()?
        .json()?;

    assert_eq!(report["ticks"], 25);
    assert_eq!(report["memoized"]["evaluations"], 25);
    assert_eq!(report["memoized"]["filter_runs"], 1);
    assert_eq!(report["memoized"]["stats_runs"], 1);
    assert_eq!(report["naive"]["filter_runs"], 25);
    assert_eq!(report["naive"]["stats_runs"], 25);
    Ok(())
}

#[test]
fn test_compare_text_report() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "20", "--seed", "2", "compare", "--ticks", "10")
        .assert_success()?;
    assert!(result.contains_stdout("Recomputations avoided"));
    assert!(result.contains_stdout("18"), "{}", result.stdout);
    Ok(())
}
