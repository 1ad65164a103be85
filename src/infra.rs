//! Infrastructure traits for abstracting I/O operations.
//!
//! Loading manifests and configuration goes through [`FileSystem`], and
//! reading the CI environment goes through [`Environment`], so both can be
//! exercised against in-memory fixtures.

use std::io;
use std::path::Path;

/// Trait for abstracting filesystem operations.
pub trait FileSystem {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Trait for abstracting environment variable lookup.
pub trait Environment {
    /// Value of `key`, or `None` when unset or empty.
    fn var(&self, key: &str) -> Option<String>;
}

/// Process environment.
#[derive(Debug, Clone, Copy)]
pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}
