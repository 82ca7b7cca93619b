//! Directory-list generation (maintenance operation, off the hot path).
//!
//! Walks the remote root two levels down — the PMC layout is
//! root → top dirs → content dirs — and persists every second-level
//! directory path, one per line, for later selection passes to consume.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::transport::Transport;

/// Enumerate the content directories under `root` and write them to
/// `out_path` in listing order. Returns how many were written.
pub fn generate_dir_list(
    transport: &mut dyn Transport,
    root: &str,
    out_path: &Path,
) -> Result<usize> {
    let top = transport
        .list_dirs(root)
        .with_context(|| format!("cannot list {root}"))?;

    let mut content_dirs = Vec::new();
    for dir in &top {
        match transport.list_dirs(dir) {
            Ok(inner) => content_dirs.extend(inner),
            Err(e) => tracing::warn!("skipping directory during indexing: {e:#}"),
        }
    }

    let mut data = String::new();
    for dir in &content_dirs {
        data.push_str(dir);
        data.push('\n');
    }
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("cannot create {}", parent.display()))?;
        }
    }
    fs::write(out_path, data)
        .with_context(|| format!("cannot write {}", out_path.display()))?;

    tracing::info!(
        "indexed {} content directories under {} into {}",
        content_dirs.len(),
        root,
        out_path.display(),
    );
    Ok(content_dirs.len())
}
