use std::error::Error;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a single fetch, tagged with the phase that failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{}", chain(.0))]
    Request(#[source] reqwest::Error),

    #[error("while creating file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("while reading {url}: {}", chain(.source))]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("while writing {url} to {target}: {source}")]
    Write {
        url: String,
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Renders an error followed by every `source()` below it, joined by ": ".
///
/// reqwest keeps the useful part ("Connection refused", "dns error") in the
/// source chain, so the top-level message alone says little.
fn chain(err: &dyn Error) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(source) = cur {
        let msg = source.to_string();
        if !out.ends_with(&msg) {
            out.push_str(": ");
            out.push_str(&msg);
        }
        cur = source.source();
    }
    out
}
