//! Common utilities for integration tests

pub mod cli;

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated config location; the file itself is only created by `config --set`
pub struct TestEnv {
    _dir: TempDir,
    config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config_path = dir.path().join("memoscope").join("config.toml");
        Ok(Self {
            _dir: dir,
            config_path,
        })
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}
