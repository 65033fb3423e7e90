use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading a facility extract.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {context}: {source}")]
    Csv {
        context: String,
        #[source]
        source: csv::Error,
    },
}
