//! `ftpharvest index` – regenerate the directory list file.

use anyhow::Result;
use ftpharvest_core::config::HarvestConfig;
use ftpharvest_core::indexer;
use ftpharvest_core::transport::FtpTransport;
use std::path::PathBuf;

pub fn run_index(cfg: &HarvestConfig, root: &str, out: Option<PathBuf>) -> Result<()> {
    let mut transport = FtpTransport::connect(&cfg.host)?;
    let out = out.unwrap_or_else(|| cfg.dir_list_path.clone());
    let count = indexer::generate_dir_list(&mut transport, root, &out)?;
    println!("Wrote {} director{} to {}", count, if count == 1 { "y" } else { "ies" }, out.display());
    Ok(())
}
