//! Error types surfaced to the UI.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a dataset snapshot.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoadError {
    /// No file matching the configured prefix/extensions exists.
    #[error("no file starting with '{prefix}' found in {}", dir.display())]
    NoData { dir: PathBuf, prefix: String },

    /// The file exists but could not be read or parsed.
    #[error("failed to load {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },
}

impl LoadError {
    /// Wrap a reader failure, keeping the whole context chain.
    pub fn read(path: impl Into<PathBuf>, err: &anyhow::Error) -> Self {
        Self::Read {
            path: path.into(),
            reason: format!("{err:#}"),
        }
    }
}

/// Invalid calculator configuration.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum CashflowError {
    #[error("loan term must be at least one year")]
    InvalidTerm,
}
