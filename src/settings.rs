//! Game settings and preferences
//!
//! Read from a JSON file at startup. Arena geometry and physics are fixed
//! constants in `consts`; only host-side behaviour is configurable here.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::TICK_PERIOD_MS;
use crate::error::SettingsError;
use crate::highscores::{DEFAULT_LEDGER_PATH, MAX_HIGH_SCORES};

/// Settings file used when `BRICKYARD_SETTINGS` is not set
pub const DEFAULT_SETTINGS_PATH: &str = "brickyard.json";

/// Environment variable overriding the settings path
pub const SETTINGS_ENV: &str = "BRICKYARD_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// High score ledger file
    pub high_score_path: PathBuf,
    /// Simulation pulse period
    pub tick_period_ms: u64,
    /// Scores listed in the game-over summary
    pub top_scores_shown: usize,
    /// Ticks a movement key stays held on terminals that never report
    /// releases
    pub key_hold_ticks: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from(DEFAULT_LEDGER_PATH),
            tick_period_ms: TICK_PERIOD_MS,
            top_scores_shown: MAX_HIGH_SCORES,
            key_hold_ticks: 12,
        }
    }
}

impl Settings {
    /// Read and parse a settings file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings.sanitized())
    }

    /// Load a settings file, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load_from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.as_ref().display());
                settings
            }
            Err(SettingsError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Load from `$BRICKYARD_SETTINGS` or `brickyard.json`
    pub fn load() -> Self {
        let path = std::env::var_os(SETTINGS_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));
        Self::load_or_default(path)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// Replace values the host cannot run with
    fn sanitized(mut self) -> Self {
        if self.tick_period_ms == 0 {
            log::warn!("tick_period_ms must be positive, using {}", TICK_PERIOD_MS);
            self.tick_period_ms = TICK_PERIOD_MS;
        }
        if self.key_hold_ticks == 0 {
            self.key_hold_ticks = 1;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().expect("tmp");
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tick_period(), Duration::from_millis(13));
        assert_eq!(settings.top_scores_shown, 10);
        assert_eq!(settings.high_score_path, PathBuf::from("data/HighScores.txt"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_temp(r#"{ "high_score_path": "/tmp/scores.txt" }"#);
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.high_score_path, PathBuf::from("/tmp/scores.txt"));
        assert_eq!(settings.tick_period_ms, TICK_PERIOD_MS);
    }

    #[test]
    fn test_zero_tick_period_replaced() {
        let file = write_temp(r#"{ "tick_period_ms": 0, "key_hold_ticks": 0 }"#);
        let settings = Settings::load_from_file(file.path()).unwrap();
        assert_eq!(settings.tick_period_ms, TICK_PERIOD_MS);
        assert_eq!(settings.key_hold_ticks, 1);
    }

    #[test]
    fn test_bad_json_falls_back() {
        let file = write_temp("{ not json");
        assert!(matches!(
            Settings::load_from_file(file.path()),
            Err(SettingsError::Parse { .. })
        ));
        assert_eq!(Settings::load_or_default(file.path()), Settings::default());
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("this/file/does/not/exist.json");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brickyard.json");
        let settings = Settings {
            top_scores_shown: 5,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load_from_file(&path).unwrap(), settings);
    }
}
