//! Shared in-memory transport for integration tests.

use ftpharvest_core::transport::{RemoteEntry, Transport, TransportError};
use std::collections::HashMap;
use std::path::Path;

/// In-memory remote tree: directories with file entries and content,
/// plus scripted listing/transfer failures.
#[derive(Default)]
pub struct MemoryTransport {
    listings: HashMap<String, Vec<RemoteEntry>>,
    contents: HashMap<String, Vec<u8>>,
    broken_dirs: Vec<String>,
    failing_files: Vec<String>,
    pub download_log: Vec<String>,
}

impl MemoryTransport {
    pub fn add_file(&mut self, dir: &str, name: &str, content: &[u8]) {
        let path = format!("{}/{}", dir.trim_end_matches('/'), name);
        self.listings
            .entry(dir.to_string())
            .or_default()
            .push(RemoteEntry::new(path.clone(), content.len() as u64));
        self.contents.insert(path, content.to_vec());
    }

    pub fn break_dir(&mut self, dir: &str) {
        self.broken_dirs.push(dir.to_string());
    }

    pub fn fail_file(&mut self, path: &str) {
        self.failing_files.push(path.to_string());
    }
}

impl Transport for MemoryTransport {
    fn list(&mut self, dir: &str) -> Result<Vec<RemoteEntry>, TransportError> {
        if self.broken_dirs.iter().any(|d| d == dir) {
            return Err(TransportError::Listing {
                dir: dir.to_string(),
                source: anyhow::anyhow!("scripted listing failure"),
            });
        }
        Ok(self.listings.get(dir).cloned().unwrap_or_default())
    }

    fn list_dirs(&mut self, _dir: &str) -> Result<Vec<String>, TransportError> {
        Ok(Vec::new())
    }

    fn download(&mut self, remote: &str, local: &Path) -> Result<u64, TransportError> {
        self.download_log.push(remote.to_string());
        if self.failing_files.iter().any(|p| p == remote) {
            return Err(TransportError::Transfer {
                path: remote.to_string(),
                source: anyhow::anyhow!("scripted transfer failure"),
            });
        }
        let content = self.contents.get(remote).ok_or_else(|| TransportError::Transfer {
            path: remote.to_string(),
            source: anyhow::anyhow!("no such remote file"),
        })?;
        std::fs::write(local, content).map_err(|e| TransportError::Transfer {
            path: remote.to_string(),
            source: anyhow::anyhow!(e),
        })?;
        Ok(content.len() as u64)
    }
}
