use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::error::FetchError;

pub const CHUNK_SIZE: usize = 8192;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub path: PathBuf,
    pub bytes: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkStats {
    pub bytes: u64,
    pub sha256: String,
}

// `written` counts bytes that reached the writer before the failure.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("read failed after {written} bytes: {source}")]
    Read {
        written: u64,
        #[source]
        source: io::Error,
    },
    #[error("write failed after {written} bytes: {source}")]
    Write {
        written: u64,
        #[source]
        source: io::Error,
    },
}

/// Copies `reader` into `writer` in pieces of at most [`CHUNK_SIZE`] bytes,
/// keeping their order, then flushes the writer.
pub fn write_chunks<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
) -> Result<ChunkStats, ChunkError> {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut hasher = Sha256::new();
    let mut written = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(ChunkError::Read { written, source }),
        };

        writer
            .write_all(&buf[..n])
            .map_err(|source| ChunkError::Write { written, source })?;
        hasher.update(&buf[..n]);
        written += n as u64;
    }

    writer
        .flush()
        .map_err(|source| ChunkError::Write { written, source })?;

    Ok(ChunkStats {
        bytes: written,
        sha256: hex::encode(hasher.finalize()),
    })
}

pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FetchError::Unknown(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// An error status (4xx/5xx) fails before anything is written to disk.
    /// A failure mid-stream leaves the partially written file in place.
    pub fn download(&self, url: &str, output_path: impl AsRef<Path>) -> Result<Download, FetchError> {
        let output_path = output_path.as_ref();
        log::info!("Downloading from {} to {:?}", url, output_path);

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        log::info!("Server responded with {}", status);

        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::http(status));
        }

        ensure_parent_dir(output_path)?;

        let mut file = fs::File::create(output_path).map_err(|source| FetchError::CreateFile {
            path: output_path.to_path_buf(),
            source,
        })?;

        let stats = write_chunks(&mut response, &mut file).map_err(|e| match e {
            ChunkError::Read { written, source } => {
                log::warn!(
                    "Transfer interrupted, leaving partial file {:?} ({} bytes)",
                    output_path,
                    written
                );
                FetchError::Body { source }
            }
            ChunkError::Write { written, source } => {
                log::warn!(
                    "Write failed, leaving partial file {:?} ({} bytes)",
                    output_path,
                    written
                );
                FetchError::Write {
                    path: output_path.to_path_buf(),
                    source,
                }
            }
        })?;

        log::info!(
            "Download completed: {} bytes, sha256 {}",
            stats.bytes,
            stats.sha256
        );

        Ok(Download {
            path: output_path.to_path_buf(),
            bytes: stats.bytes,
            sha256: stats.sha256,
        })
    }
}

pub fn download(url: &str, output_path: impl AsRef<Path>) -> Result<Download, FetchError> {
    Fetcher::new()?.download(url, output_path)
}

fn ensure_parent_dir(path: &Path) -> Result<(), FetchError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            log::info!("Creating directory {:?}", dir);
            fs::create_dir_all(dir).map_err(|source| FetchError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}
