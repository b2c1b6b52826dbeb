//! Parser error types for fp-parser.

use std::path::PathBuf;

/// Errors that can occur while loading and parsing Go packages.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("{path}: missing package clause")]
    MissingPackageClause { path: PathBuf },

    #[error("{dir}: found packages {first} and {second} in one directory")]
    MixedPackages {
        dir: PathBuf,
        first: String,
        second: String,
    },

    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("Walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
