use std::fmt;

use crate::download::Download;
use crate::error::{ErrorCategory, FetchError};

/// The single status line printed for a download attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Saved { path: String, bytes: u64 },
    Failed { category: ErrorCategory, cause: String },
}

impl Report {
    pub fn from_result(result: &Result<Download, FetchError>) -> Self {
        match result {
            Ok(download) => Report::Saved {
                path: download.path.display().to_string(),
                bytes: download.bytes,
            },
            Err(e) => Report::Failed {
                category: e.category(),
                cause: e.to_string(),
            },
        }
    }

    pub fn category(&self) -> Option<ErrorCategory> {
        match self {
            Report::Saved { .. } => None,
            Report::Failed { category, .. } => Some(*category),
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Saved { path, bytes } => {
                write!(f, "image saved to: {} ({} bytes)", path, bytes)
            }
            Report::Failed {
                category: ErrorCategory::Network,
                cause,
            } => write!(f, "network error while downloading image: {}", cause),
            Report::Failed {
                category: ErrorCategory::Filesystem,
                cause,
            } => write!(f, "file error while saving image: {}", cause),
            Report::Failed {
                category: ErrorCategory::Unknown,
                cause,
            } => write!(f, "unknown error: {}", cause),
        }
    }
}
