//! Curl-backed FTP transport.
//!
//! libcurl autodetects the protocol settings (passive mode, EPSV fallback)
//! so connecting is a cheap probe of the server root. Listing fetches the
//! raw LIST output of a directory URL; downloads stream into the local file
//! and are size-verified with one automatic retry on mismatch.

use anyhow::{anyhow, Context, Result};
use curl::easy::Easy;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use url::Url;

use super::list_parse::parse_unix_listing;
use super::{RemoteEntry, Transport, TransportError};

/// Anonymous FTP client for one server.
pub struct FtpTransport {
    host: String,
    base: Url,
}

impl FtpTransport {
    /// Probe `host` and return a connected transport. Any failure here is
    /// unrecoverable for the run.
    pub fn connect(host: &str) -> Result<Self, TransportError> {
        let base = Url::parse(&format!("ftp://{host}/")).map_err(|e| TransportError::Connect {
            host: host.to_string(),
            source: anyhow!("invalid host: {e}"),
        })?;
        let transport = Self {
            host: host.to_string(),
            base,
        };
        transport
            .probe_root()
            .map_err(|e| TransportError::Connect {
                host: host.to_string(),
                source: e,
            })?;
        tracing::debug!("connected to ftp://{}/", transport.host);
        Ok(transport)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Name-only listing of the root, output discarded. Verifies the server
    /// is reachable and speaks FTP before the enumeration pass starts.
    fn probe_root(&self) -> Result<()> {
        let mut easy = self.handle(&self.base)?;
        // Name-only listing (what CURLOPT_DIRLISTONLY does for FTP); the
        // curl crate doesn't expose that option directly.
        easy.custom_request("NLST").map_err(curl_err)?;
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| Ok(data.len()))
                .map_err(curl_err)?;
            transfer.perform().context("FTP probe failed")?;
        }
        Ok(())
    }

    fn handle(&self, url: &Url) -> Result<Easy> {
        let mut easy = Easy::new();
        easy.url(url.as_str()).map_err(curl_err)?;
        easy.connect_timeout(Duration::from_secs(30)).map_err(curl_err)?;
        easy.low_speed_limit(1024).map_err(curl_err)?;
        easy.low_speed_time(Duration::from_secs(60)).map_err(curl_err)?;
        Ok(easy)
    }

    fn dir_url(&self, dir: &str) -> Result<Url> {
        // A trailing slash makes libcurl issue LIST instead of RETR.
        let mut rel = dir.trim().trim_start_matches('/').to_string();
        if !rel.ends_with('/') {
            rel.push('/');
        }
        self.base
            .join(&rel)
            .with_context(|| format!("invalid directory path: {dir}"))
    }

    fn file_url(&self, path: &str) -> Result<Url> {
        self.base
            .join(path.trim().trim_start_matches('/'))
            .with_context(|| format!("invalid remote path: {path}"))
    }

    /// Fetch the raw LIST output of one directory.
    fn fetch_listing(&self, dir: &str) -> Result<String> {
        let url = self.dir_url(dir)?;
        let mut easy = self.handle(&url)?;
        let mut raw = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    raw.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(curl_err)?;
            transfer.perform().context("LIST failed")?;
        }
        String::from_utf8(raw).context("listing was not valid UTF-8")
    }

    fn try_download(&self, remote: &str, local: &Path) -> Result<u64> {
        let url = self.file_url(remote)?;
        let mut easy = self.handle(&url)?;
        // Transfers can legitimately take a while; cap them all the same.
        easy.timeout(Duration::from_secs(3600)).map_err(curl_err)?;

        let mut file = File::create(local)
            .with_context(|| format!("create {}", local.display()))?;
        let mut written: u64 = 0;
        let mut write_err: Option<std::io::Error> = None;
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| match file.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(curl_err)?;
            transfer.perform().context("RETR failed")?;
        }
        if let Some(e) = write_err {
            return Err(anyhow!(e)).with_context(|| format!("write {}", local.display()));
        }
        file.sync_all()
            .with_context(|| format!("sync {}", local.display()))?;

        // Verify against the size the server announced, when it did.
        let expected = easy
            .content_length_download()
            .ok()
            .filter(|len| *len >= 0.0)
            .map(|len| len as u64);
        if let Some(expected) = expected {
            if written != expected {
                anyhow::bail!("partial transfer: wrote {written} of {expected} bytes");
            }
        }
        Ok(written)
    }
}

impl Transport for FtpTransport {
    fn list(&mut self, dir: &str) -> Result<Vec<RemoteEntry>, TransportError> {
        let raw = self.fetch_listing(dir).map_err(|e| TransportError::Listing {
            dir: dir.to_string(),
            source: e,
        })?;
        let base = dir.trim_end_matches('/');
        Ok(parse_unix_listing(&raw)
            .into_iter()
            .filter(|item| !item.is_dir)
            .map(|item| RemoteEntry::new(format!("{base}/{}", item.name), item.size))
            .collect())
    }

    fn list_dirs(&mut self, dir: &str) -> Result<Vec<String>, TransportError> {
        let raw = self.fetch_listing(dir).map_err(|e| TransportError::Listing {
            dir: dir.to_string(),
            source: e,
        })?;
        let base = dir.trim_end_matches('/');
        Ok(parse_unix_listing(&raw)
            .into_iter()
            .filter(|item| item.is_dir)
            .map(|item| format!("{base}/{}", item.name))
            .collect())
    }

    fn download(&mut self, remote: &str, local: &Path) -> Result<u64, TransportError> {
        match self.try_download(remote, local) {
            Ok(n) => Ok(n),
            Err(first) => {
                tracing::warn!("download of {remote} failed ({first:#}), retrying once");
                match self.try_download(remote, local) {
                    Ok(n) => Ok(n),
                    Err(second) => {
                        // Don't leave a partial file behind.
                        let _ = std::fs::remove_file(local);
                        Err(TransportError::Transfer {
                            path: remote.to_string(),
                            source: second,
                        })
                    }
                }
            }
        }
    }
}

fn curl_err(e: curl::Error) -> anyhow::Error {
    anyhow!("curl: {e}")
}
