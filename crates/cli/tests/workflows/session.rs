//! session

use crate::common::TestEnv;
use crate::memo;
use anyhow::Result;

#[test]
fn test_session_renders_settled_search() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "60", "--seed", "4", "session", "--quiet-period-ms", "20")
        .stdin("jo\n")
        .assert_success()?;

    assert!(result.contains_stdout("search=\"jo\""), "{}", result.stdout);
    assert!(result.contains_stdout("settle events: 1 search, 0 category"), "{}", result.stdout);
    assert!(result.contains_stdout("renders:       2"), "{}", result.stdout);
    Ok(())
}

#[test]
fn test_typed_keystrokes_settle_once() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(
        env.config_path(),
        "--count", "60", "--seed", "4",
        "session", "--quiet-period-ms", "200", "--keystroke-interval-ms", "5"
    )
    .stdin("jane\n")
    .assert_success()?;

    assert!(result.contains_stdout("search=\"jane\""), "{}", result.stdout);
    assert!(!result.contains_stdout("search=\"jan\""), "{}", result.stdout);
    assert!(result.contains_stdout("settle events: 1 search"), "{}", result.stdout);
    Ok(())
}

#[test]
fn test_tick_reuses_cached_result() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "60", "--seed", "4", "session")
        .stdin(":tick\n:tick\n:quit\n")
        .assert_success()?;

    // One evaluation per render, but only the first one filtered
    assert!(result.contains_stdout("evaluations 3 · filter 1 · stats 1"), "{}", result.stdout);
    Ok(())
}

#[test]
fn test_unknown_category_keeps_session_running() -> Result<()> {
    let env = TestEnv::new()?;
    let result = memo!(env.config_path(), "--count", "60", "--seed", "4", "session", "--quiet-period-ms", "20")
        .stdin(":cat Astronauts\njo\n")
        .assert_success()?;

    assert!(result.contains_stdout("Unknown category 'Astronauts'"), "{}", result.stdout);
    assert!(result.contains_stdout("search=\"jo\""), "{}", result.stdout);
    assert!(result.contains_stdout("settle events: 1 search, 0 category"), "{}", result.stdout);
    Ok(())
}
