pub mod cli;
pub mod download;
pub mod error;
pub mod logging;
pub mod report;

pub use download::{download, Download, Fetcher, CHUNK_SIZE};
pub use error::{ErrorCategory, FetchError};
pub use report::Report;
