//! `ftpharvest plan` – dry-run the selection pass and print it.

use anyhow::Result;
use ftpharvest_core::config::HarvestConfig;
use ftpharvest_core::dirlist::DirectorySource;
use ftpharvest_core::selector;
use ftpharvest_core::transport::FtpTransport;

pub fn run_plan(cfg: &HarvestConfig) -> Result<()> {
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

    println!("{:<12} PATH", "SIZE");
    for entry in selection.iter() {
        println!("{:<12} {}", entry.size, entry.path);
    }
    println!(
        "{} file(s), {} bytes total (budget {} bytes, cap {} files)",
        selection.len(),
        selection.total_bytes(),
        cfg.space_budget_bytes,
        cfg.max_file_count,
    );
    Ok(())
}
