//! Error type shared by every stage of the decomposition pipeline.
//!
//! Only the failures that stop a run live here. Degraded inputs (a missing
//! `\input` target, a circular inclusion, an unbalanced brace) never surface
//! as errors: they are written inline into the flattened stream instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::lookup::LookupError;

#[derive(Debug, Error)]
/// Everything that can abort a split, index, taxonomy or lookup run.
pub enum Error {
    /// The root document (or any `.tex` file to use as one) does not exist.
    #[error("root document not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// A read or write on a specific path failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// File or directory the operation targeted.
        path: PathBuf,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },

    /// A manifest, index or taxonomy record could not be (de)serialised.
    #[error("invalid JSON record: {0}")]
    Json(#[from] serde_json::Error),

    /// The `folio.toml` file exists but could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A taxonomy was requested for a segment file that is not on disk.
    #[error("section file not found: {}", .0.display())]
    SegmentNotFound(PathBuf),

    /// A query did not resolve to exactly one written segment.
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl Error {
    #[must_use]
    /// Attaches the offending path to an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
