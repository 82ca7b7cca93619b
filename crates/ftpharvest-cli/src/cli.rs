//! CLI for the ftpharvest mirror harvester.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use ftpharvest_core::config::{self, HarvestConfig};
use std::path::PathBuf;

use commands::{run_completions, run_harvest, run_index, run_plan};

/// Top-level CLI for the ftpharvest mirror harvester.
#[derive(Debug, Parser)]
#[command(name = "ftpharvest")]
#[command(about = "ftpharvest: budgeted harvesting of files from an FTP mirror", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Per-run overrides of the configured selection bounds.
#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// FTP server hostname.
    #[arg(long)]
    host: Option<String>,

    /// Directory list file to scan, one remote directory per line.
    #[arg(long, value_name = "FILE")]
    dirs_file: Option<PathBuf>,

    /// Smallest admissible file size in bytes (inclusive).
    #[arg(long, value_name = "BYTES")]
    min_size: Option<u64>,

    /// Largest admissible file size in bytes (inclusive).
    #[arg(long, value_name = "BYTES")]
    max_size: Option<u64>,

    /// Total disk-space budget in bytes.
    #[arg(long, value_name = "BYTES")]
    budget: Option<u64>,

    /// Maximum number of files to download.
    #[arg(long, value_name = "N")]
    max_files: Option<usize>,
}

impl SelectionArgs {
    fn apply(self, cfg: &mut HarvestConfig) {
        if let Some(host) = self.host {
            cfg.host = host;
        }
        if let Some(path) = self.dirs_file {
            cfg.dir_list_path = path;
        }
        if let Some(n) = self.min_size {
            cfg.min_file_size_bytes = n;
        }
        if let Some(n) = self.max_size {
            cfg.max_file_size_bytes = n;
        }
        if let Some(n) = self.budget {
            cfg.space_budget_bytes = n;
        }
        if let Some(n) = self.max_files {
            cfg.max_file_count = n;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List what would be downloaded, without fetching anything.
    Plan {
        #[command(flatten)]
        selection: SelectionArgs,
    },

    /// Select files under the configured budget and download them.
    Run {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Destination directory for downloaded files.
        #[arg(long, value_name = "DIR")]
        dest: Option<PathBuf>,
    },

    /// Regenerate the directory list file by walking the remote tree.
    Index {
        /// Remote root directory to walk (e.g. /pub/pmc/oa_pdf/).
        #[arg(long, value_name = "PATH")]
        root: String,

        /// Output file; defaults to the configured dir_list_path.
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// FTP server hostname.
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = &cli.command {
            return run_completions(*shell);
        }

        let mut cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Plan { selection } => {
                selection.apply(&mut cfg);
                run_plan(&cfg)
            }
            CliCommand::Run { selection, dest } => {
                selection.apply(&mut cfg);
                if let Some(dest) = dest {
                    cfg.download_dir = dest;
                }
                run_harvest(&cfg)
            }
            CliCommand::Index { root, out, host } => {
                if let Some(host) = host {
                    cfg.host = host;
                }
                run_index(&cfg, &root, out)
            }
            CliCommand::Completions { .. } => unreachable!("handled above"),
        }
    }
}
