//! Download the admitted selection, one file at a time.
//!
//! Each file lands in the destination directory under its sanitized base
//! name, overwriting any previous copy. A failed transfer is reported and
//! skipped; it never aborts the batch.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::filename::local_name_for;
use crate::selector::Selection;
use crate::transport::Transport;

/// Aggregated outcome of one fetch pass. Never persisted.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Files downloaded and verified.
    pub success_count: usize,
    /// Sum of the selected sizes of the successful files.
    pub consumed_bytes: u64,
    /// Remote paths that failed after the transport's verify/retry.
    pub failures: Vec<String>,
}

/// Fetch every entry of `selection`, in selection order, into `dest_dir`.
/// The only fatal step is creating the destination directory itself.
pub fn fetch(
    transport: &mut dyn Transport,
    selection: &Selection,
    dest_dir: &Path,
) -> Result<FetchReport> {
    fs::create_dir_all(dest_dir)
        .with_context(|| format!("cannot create {}", dest_dir.display()))?;

    let mut report = FetchReport::default();
    let started = Instant::now();

    for entry in selection.iter() {
        let local = dest_dir.join(local_name_for(&entry.path));
        match transport.download(&entry.path, &local) {
            Ok(written) => {
                tracing::info!("downloaded {} ({} bytes)", entry.path, written);
                report.success_count += 1;
                report.consumed_bytes += entry.size;
            }
            Err(e) => {
                tracing::warn!("skipping file: {e:#}");
                report.failures.push(entry.path.clone());
            }
        }
    }

    tracing::info!(
        "downloaded {} of {} file(s), {} bytes, in {} ms",
        report.success_count,
        selection.len(),
        report.consumed_bytes,
        started.elapsed().as_millis(),
    );
    Ok(report)
}
