//! Error types for the I/O edges of the game
//!
//! The simulation itself has no failure modes; only persistence and
//! configuration can fail, and callers degrade rather than abort.

use std::path::PathBuf;

use thiserror::Error;

/// High score ledger failures
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to read high scores from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to append high score to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings file failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LedgerError {
    /// True when the ledger file simply does not exist yet
    pub fn is_missing(&self) -> bool {
        matches!(self, LedgerError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
