// Per-file scan failures. None of these abort a run; the generator records
// them in its ScanReport and moves on to the next file.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("syntax error in {path} near line {line}")]
    Syntax { path: PathBuf, line: usize },

    #[error("failed to load the Python grammar: {0}")]
    Grammar(String),
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
