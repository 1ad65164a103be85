//! Test fixture helpers for creating stats manifests
//!
//! Provides temporary workspaces holding a base and a head stats file in
//! the shape bundlers actually emit.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Re-export anyhow for convenience
pub use anyhow;

/// Base build: one script, one stylesheet, one image
pub const BASE_STATS: &str = r#"{
  "hash": "4c1f0a",
  "time": 4210,
  "assets": [
    { "name": "main.js", "size": 1000, "chunks": [0] },
    { "name": "styles.css", "size": 300, "chunks": [0] },
    { "name": "logo.png", "size": 2000, "chunks": [] }
  ]
}"#;

/// Head build: bigger script, new vendor chunk, smaller stylesheet
pub const HEAD_STATS: &str = r#"{
  "hash": "9be2d3",
  "time": 3990,
  "assets": [
    { "name": "main.js", "size": 1200, "chunks": [0] },
    { "name": "vendor.js", "size": 500, "chunks": [1] },
    { "name": "styles.css", "size": 250, "chunks": [0] },
    { "name": "logo.png", "size": 2000, "chunks": [] }
  ]
}"#;

/// Temporary directory with `base-stats.json` and `head-stats.json`
pub struct StatsWorkspace {
    dir: TempDir,
}

impl StatsWorkspace {
    /// Workspace with [`BASE_STATS`] and [`HEAD_STATS`]
    pub fn new() -> anyhow::Result<Self> {
        Self::with_stats(BASE_STATS, HEAD_STATS)
    }

    /// Workspace with custom manifest contents
    pub fn with_stats(base: &str, head: &str) -> anyhow::Result<Self> {
        let dir = TempDir::new()?;
        fs::write(dir.path().join("base-stats.json"), base)?;
        fs::write(dir.path().join("head-stats.json"), head)?;
        Ok(Self { dir })
    }

    /// Workspace root
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the base manifest
    pub fn base(&self) -> PathBuf {
        self.dir.path().join("base-stats.json")
    }

    /// Path of the head manifest
    pub fn head(&self) -> PathBuf {
        self.dir.path().join("head-stats.json")
    }

    /// Write `.bundle-diff.toml` into the workspace root
    pub fn write_config(&self, contents: &str) -> anyhow::Result<()> {
        fs::write(self.dir.path().join(".bundle-diff.toml"), contents)?;
        Ok(())
    }

    /// Write a GitHub event payload and return its path
    pub fn write_event(&self, payload: &str) -> anyhow::Result<PathBuf> {
        let path = self.dir.path().join("event.json");
        fs::write(&path, payload)?;
        Ok(path)
    }

    /// `--base-stats-path` / `--head-stats-path` arguments
    pub fn stats_args(&self) -> Vec<String> {
        vec![
            "--base-stats-path".to_string(),
            self.base().display().to_string(),
            "--head-stats-path".to_string(),
            self.head().display().to_string(),
        ]
    }
}

/// Multi-build stats with `child` as the first of two children
pub fn multi_build(child: &str) -> String {
    format!(
        r#"{{ "children": [{}, {{ "assets": [{{ "name": "other.js", "size": 1 }}] }}] }}"#,
        child
    )
}
