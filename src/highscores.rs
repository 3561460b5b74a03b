//! High score ledger
//!
//! Final scores are appended, one integer per line, to a plain text file. The
//! ledger is never rewritten or truncated; display code reads every entry,
//! sorts descending and shows the top few.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

/// Number of high scores shown in the game-over summary
pub const MAX_HIGH_SCORES: usize = 10;

/// Default ledger location, relative to the working directory
pub const DEFAULT_LEDGER_PATH: &str = "data/HighScores.txt";

/// Append-only store of final scores
pub trait ScoreLedger {
    /// Every recorded score, in storage order
    fn read_all(&self) -> Result<Vec<u32>, LedgerError>;

    /// Record one final score
    fn append(&mut self, score: u32) -> Result<(), LedgerError>;
}

/// Ledger backed by a text file. The file is opened and closed inside each
/// call; no handle is kept.
#[derive(Debug, Clone)]
pub struct FileLedger {
    path: PathBuf,
}

impl FileLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_PATH)
    }
}

impl ScoreLedger for FileLedger {
    fn read_all(&self) -> Result<Vec<u32>, LedgerError> {
        let text = fs::read_to_string(&self.path).map_err(|source| LedgerError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(parse_scores(&text, &self.path))
    }

    fn append(&mut self, score: u32) -> Result<(), LedgerError> {
        let write_err = |source| LedgerError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(write_err)?;
        writeln!(file, "{score}").map_err(write_err)?;
        log::info!("Recorded score {} in {}", score, self.path.display());
        Ok(())
    }
}

/// Whitespace-separated integers; anything else is skipped
fn parse_scores(text: &str, path: &Path) -> Vec<u32> {
    text.split_whitespace()
        .filter_map(|token| match token.parse::<u32>() {
            Ok(score) => Some(score),
            Err(_) => {
                log::warn!("Skipping malformed score {:?} in {}", token, path.display());
                None
            }
        })
        .collect()
}

/// In-memory ledger, for hosts without a writable disk and for tests
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    pub scores: Vec<u32>,
}

impl ScoreLedger for MemoryLedger {
    fn read_all(&self) -> Result<Vec<u32>, LedgerError> {
        Ok(self.scores.clone())
    }

    fn append(&mut self, score: u32) -> Result<(), LedgerError> {
        self.scores.push(score);
        Ok(())
    }
}

/// Leaderboard view of a ledger, sorted descending
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct HighScores {
    pub entries: Vec<u32>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_scores(mut scores: Vec<u32>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        Self { entries: scores }
    }

    /// Read the full ledger. An unavailable ledger reads as empty.
    pub fn load(ledger: &dyn ScoreLedger) -> Self {
        match ledger.read_all() {
            Ok(scores) => {
                log::debug!("Loaded {} high scores", scores.len());
                Self::from_scores(scores)
            }
            Err(e) if e.is_missing() => {
                log::debug!("{e}; starting with no high scores");
                Self::new()
            }
            Err(e) => {
                log::warn!("{e}; starting with no high scores");
                Self::new()
            }
        }
    }

    /// The best `n` scores
    pub fn top(&self, n: usize) -> &[u32] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Game-over text: the final score, then the best `shown` scores
    pub fn summary(&self, final_score: u32, shown: usize) -> String {
        let mut text = format!("YOUR SCORE: {final_score}\n\nHIGH SCORES\n\n");
        for score in self.top(shown) {
            text.push_str(&format!("{score}\n"));
        }
        text
    }
}
