//! `ftpharvest run` – select under the budget, then download.

use anyhow::Result;
use ftpharvest_core::config::HarvestConfig;
use ftpharvest_core::dirlist::DirectorySource;
use ftpharvest_core::transport::FtpTransport;
use ftpharvest_core::{fetcher, selector};

pub fn run_harvest(cfg: &HarvestConfig) -> Result<()> {
    let mut transport = FtpTransport::connect(&cfg.host)?;
    let source = DirectorySource::from_file(&cfg.dir_list_path)?;
    if source.is_empty() {
        tracing::warn!("directory list {} is empty", cfg.dir_list_path.display());
    }

    let selection = selector::select(&mut transport, source.directories(), &cfg.limits());
    if selection.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }
    println!(
        "Selected {} file(s), {} bytes. Downloading to {}...",
        selection.len(),
        selection.total_bytes(),
        cfg.download_dir.display(),
    );

    let report = fetcher::fetch(&mut transport, &selection, &cfg.download_dir)?;
    println!(
        "Downloaded {} of {} file(s), {} bytes, into {}.",
        report.success_count,
        selection.len(),
        report.consumed_bytes,
        cfg.download_dir.display(),
    );
    if !report.failures.is_empty() {
        println!("Failed:");
        for path in &report.failures {
            println!("  {path}");
        }
    }
    Ok(())
}
