//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per pulse)
//! - Integer geometry only
//! - Stable iteration order (bricks by id)
//! - No rendering, file or platform dependencies

pub mod collision;
pub mod placement;
pub mod state;
pub mod tick;

pub use collision::{Edge, edge_contact, strike_bricks, wall_contact};
pub use placement::{Color, Placement};
pub use state::{
    Ball, Brick, Direction, GameEvent, GamePhase, GameState, Shield, Sprite, default_layout,
};
pub use tick::{TickInput, launch, tick};
