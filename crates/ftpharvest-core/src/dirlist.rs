//! The directory source: an ordered, read-once list of remote directories.
//!
//! Pre-computed by the indexer and stored as a line-oriented text file;
//! the selector treats it as a read-only ordered list.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Ordered remote directory paths to scan.
#[derive(Debug)]
pub struct DirectorySource {
    directories: Vec<String>,
}

impl DirectorySource {
    /// Read the directory list once at startup. Blank lines and `#`
    /// comments are skipped; order is file order. A missing or unreadable
    /// file ends the run.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("cannot read directory list {}", path.display()))?;
        let directories = data
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        Ok(Self { directories })
    }

    pub fn directories(&self) -> &[String] {
        &self.directories
    }

    pub fn len(&self) -> usize {
        self.directories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}
