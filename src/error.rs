use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced to the user. Config-load problems are not listed here:
/// a bad config file falls back to defaults with a warning instead of
/// stopping the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read input file {path}: {source}")]
    InputFile { path: PathBuf, source: io::Error },

    #[error("no window with a title containing \"{0}\"")]
    WindowNotFound(String),

    #[error("could not activate window \"{title}\": {reason}")]
    WindowActivation { title: String, reason: String },

    #[error("keystroke backend unavailable: {0}")]
    SinkUnavailable(String),

    #[error("keystroke delivery failed: {0}")]
    Injection(String),

    #[error("cannot write config file {path}: {source}")]
    ConfigWrite { path: PathBuf, source: io::Error },
}

pub type Result<T> = std::result::Result<T, Error>;
