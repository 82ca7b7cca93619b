use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Global configuration loaded from `~/.config/ftpharvest/config.toml`.
///
/// Defaults target the PubMed Central open-access mirror; every field can be
/// overridden per run from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// FTP server hostname (anonymous access).
    pub host: String,
    /// Smallest file size admitted for download, in bytes (inclusive).
    pub min_file_size_bytes: u64,
    /// Largest file size admitted for download, in bytes (inclusive).
    pub max_file_size_bytes: u64,
    /// Total bytes the whole selection may occupy on disk.
    pub space_budget_bytes: u64,
    /// Maximum number of files admitted into one selection.
    pub max_file_count: usize,
    /// Directory downloaded files are written into.
    pub download_dir: PathBuf,
    /// Line-oriented file listing the remote directories to scan, in order.
    pub dir_list_path: PathBuf,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            host: "ftp.ncbi.nlm.nih.gov".to_string(),
            min_file_size_bytes: 100,
            max_file_size_bytes: 10_000_000,
            space_budget_bytes: 100_000_000_000,
            max_file_count: 1000,
            download_dir: PathBuf::from("downloads"),
            dir_list_path: PathBuf::from("ftp-dirs.txt"),
        }
    }
}

impl HarvestConfig {
    /// Bounds used by the selector, as one value.
    pub fn limits(&self) -> crate::selector::SelectionLimits {
        crate::selector::SelectionLimits {
            space_budget: self.space_budget_bytes,
            max_files: self.max_file_count,
            min_size: self.min_file_size_bytes,
            max_size: self.max_file_size_bytes,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ftpharvest")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<HarvestConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = HarvestConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: HarvestConfig = toml::from_str(&data)?;
    Ok(cfg)
}
