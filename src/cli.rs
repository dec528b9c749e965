use std::ffi::OsString;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;

use crate::download::{Download, Fetcher};
use crate::error::FetchError;

pub const EXAMPLE: &str = "https://example.com/image.jpg ./downloads/my_image.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub url: OsString,
    pub output_path: PathBuf,
}

impl Invocation {
    /// Takes the arguments after the program name; `None` unless there are
    /// exactly two.
    pub fn parse<I, S>(args: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let url = args.next()?;
        let output_path = args.next()?;
        if args.next().is_some() {
            return None;
        }

        Some(Self {
            url,
            output_path: PathBuf::from(output_path),
        })
    }

    pub fn run(&self) -> Result<Download, FetchError> {
        let url = self
            .url
            .to_str()
            .ok_or_else(|| FetchError::InvalidUrl(self.url.to_string_lossy().into_owned()))?;

        catch_panics(|| Fetcher::new()?.download(url, &self.output_path))
    }
}

pub fn usage(program: &str) -> String {
    format!(
        "usage: {program} <jpg_url> <output_path_with_filename>\nexample: {program} {EXAMPLE}"
    )
}

// Panics become `Unknown` errors. The hook is swapped for the duration so
// the message goes to the log file instead of stderr.
fn catch_panics<F>(f: F) -> Result<Download, FetchError>
where
    F: FnOnce() -> Result<Download, FetchError>,
{
    let previous = panic::take_hook();
    panic::set_hook(Box::new(|info| log::error!("Download panicked: {}", info)));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    panic::set_hook(previous);

    outcome.unwrap_or_else(|payload| Err(FetchError::Unknown(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "download panicked".to_string()
    }
}
