use std::fmt;
use std::io;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Filesystem,
    Unknown,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Network => "network error",
            ErrorCategory::Filesystem => "file error",
            ErrorCategory::Unknown => "unknown error",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("server returned HTTP {}{}", .status.as_u16(), reason_suffix(.reason))]
    Http {
        status: StatusCode,
        reason: Option<&'static str>,
    },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("URL is not valid UTF-8: {0}")]
    InvalidUrl(String),

    #[error("failed to read response body: {source}")]
    Body {
        #[source]
        source: io::Error,
    },

    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Unknown(String),
}

fn reason_suffix(reason: &Option<&'static str>) -> String {
    reason.map(|r| format!(" ({})", r)).unwrap_or_default()
}

impl FetchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FetchError::Http { .. }
            | FetchError::Network { .. }
            | FetchError::InvalidUrl(_)
            | FetchError::Body { .. } => ErrorCategory::Network,
            FetchError::CreateDir { .. }
            | FetchError::CreateFile { .. }
            | FetchError::Write { .. } => ErrorCategory::Filesystem,
            FetchError::Unknown(_) => ErrorCategory::Unknown,
        }
    }

    pub(crate) fn http(status: StatusCode) -> Self {
        FetchError::Http {
            status,
            reason: status.canonical_reason(),
        }
    }
}
