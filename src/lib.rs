//! Brickyard - a brick-breaker arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, game state)
//! - `session`: Engine wrapper owning the ledger, pause state and input intent
//! - `highscores`: Append-only high score ledger
//! - `renderer`: Character-grid rendering of entity snapshots
//! - `platform`: Input intent and key-event translation
//! - `settings`: Runtime configuration

pub mod error;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{LedgerError, SettingsError};
pub use highscores::{FileLedger, HighScores, MemoryLedger, ScoreLedger};
pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed tick period in milliseconds
    pub const TICK_PERIOD_MS: u64 = 13;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: i32 = 786;
    pub const ARENA_HEIGHT: i32 = 564;

    /// Leading-edge band used to catch an impact before true overlap.
    /// Must grow if ball speed is raised.
    pub const IMPACT_BUFFER: i32 = 6;

    /// Ball defaults
    pub const BALL_SIZE: i32 = 20;
    pub const BALL_LAUNCH_VX: i32 = 4;
    pub const BALL_LAUNCH_VY: i32 = 4;
    pub const SERVE_X: i32 = 100;
    pub const SERVE_Y: i32 = 200;

    /// Shield defaults - height is a sixth of the width
    pub const SHIELD_WIDTH: i32 = 80;
    pub const SHIELD_HEIGHT: i32 = SHIELD_WIDTH / 6;
    pub const SHIELD_Y: i32 = 500;
    pub const SHIELD_SPEED: i32 = 5;

    /// Brick defaults - height is a third of the width
    pub const BRICK_WIDTH: i32 = 58;
    pub const BRICK_HEIGHT: i32 = BRICK_WIDTH / 3;
    pub const BRICK_POINTS: u32 = 10;

    /// Balls available at session start
    pub const STARTING_BALLS: u32 = 3;
}
