//! Remote transport boundary.
//!
//! The selector and fetcher only depend on the [`Transport`] trait; the
//! curl-backed FTP client lives in [`ftp`]. Error kinds encode the
//! propagation policy: a connect failure ends the run, a listing failure
//! skips one directory, a transfer failure skips one file.

mod ftp;
mod list_parse;

pub use ftp::FtpTransport;

use std::path::Path;
use thiserror::Error;

/// One file listed on the remote server. Immutable; lives for one
/// enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEntry {
    /// Full remote path, unique within a listing.
    pub path: String,
    /// Size in bytes as reported by the listing.
    pub size: u64,
}

impl RemoteEntry {
    pub fn new(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

/// Failure of one transport operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server unreachable. Fatal for the run: nothing to list or fetch.
    #[error("cannot connect to {host}: {source}")]
    Connect {
        host: String,
        #[source]
        source: anyhow::Error,
    },

    /// One directory's contents could not be retrieved. The caller skips
    /// that directory and continues.
    #[error("listing {dir} failed: {source}")]
    Listing {
        dir: String,
        #[source]
        source: anyhow::Error,
    },

    /// One file failed to transfer (after the built-in verify/retry).
    /// The caller skips that file and continues.
    #[error("transfer of {path} failed: {source}")]
    Transfer {
        path: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Blocking remote-access operations. The pipeline is strictly sequential,
/// so one mutable handle is enough.
pub trait Transport {
    /// List the immediate file entries of `dir`, in server order.
    fn list(&mut self, dir: &str) -> Result<Vec<RemoteEntry>, TransportError>;

    /// List the immediate subdirectories of `dir`. Off the hot path; used
    /// only when regenerating the directory list.
    fn list_dirs(&mut self, dir: &str) -> Result<Vec<String>, TransportError>;

    /// Download `remote` into the local file `local`, overwriting any
    /// existing file. Returns the number of bytes written after the
    /// transfer verified.
    fn download(&mut self, remote: &str, local: &Path) -> Result<u64, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_entry_holds_path_and_size() {
        let e = RemoteEntry::new("/pub/a/b.pdf", 4096);
        assert_eq!(e.path, "/pub/a/b.pdf");
        assert_eq!(e.size, 4096);
        assert_eq!(e.clone(), e);
    }

    #[test]
    fn transport_error_messages_name_the_target() {
        let err = TransportError::Listing {
            dir: "/pub/x".to_string(),
            source: anyhow::anyhow!("timed out"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/pub/x"));
        assert!(msg.contains("timed out"));
    }
}
