//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Rendering only ever sees the
//! `Sprite` snapshots.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::placement::{Color, Placement};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ball stopped, waiting for the launch action
    Serving,
    /// Ball in play
    Active,
    /// Session ended
    GameOver,
}

/// Events raised during a tick, drained by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A ball was put into play
    Launched { balls_remaining: u32 },
    /// A brick was struck and removed
    BrickDestroyed { id: u32, points: u32 },
    /// The last brick went down
    BoardCleared,
    /// The ball reached the floor
    BallLost { balls_remaining: u32 },
    /// No balls left; final score recorded
    GameOver { final_score: u32 },
}

/// Immutable render record: position, size and color only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub color: Color,
}

impl From<&Placement> for Sprite {
    fn from(p: &Placement) -> Self {
        Self {
            x: p.pos.x,
            y: p.pos.y,
            width: p.size.x,
            height: p.size.y,
            color: p.color,
        }
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub placement: Placement,
    /// Pixels per tick
    pub vel: IVec2,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

impl Ball {
    /// A stopped ball at the serve point
    pub fn new() -> Self {
        Self {
            placement: Placement::new(
                IVec2::new(SERVE_X, SERVE_Y),
                IVec2::splat(BALL_SIZE),
                Color::LIGHT_GRAY,
            ),
            vel: IVec2::ZERO,
        }
    }

    /// Advance position by the current velocity. No clamping.
    pub fn move_step(&mut self) {
        self.placement.pos += self.vel;
    }

    pub fn set_velocity(&mut self, vx: i32, vy: i32) {
        self.vel = IVec2::new(vx, vy);
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.placement.pos = IVec2::new(x, y);
    }

    #[inline]
    pub fn flip_vx(&mut self) {
        self.vel.x = -self.vel.x;
    }

    #[inline]
    pub fn flip_vy(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Reset to the serve point with the launch vector
    pub fn serve(&mut self) {
        self.set_position(SERVE_X, SERVE_Y);
        self.set_velocity(BALL_LAUNCH_VX, BALL_LAUNCH_VY);
    }

    pub fn halt(&mut self) {
        self.vel = IVec2::ZERO;
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::from(&self.placement)
    }
}

/// Requested shield motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Left,
    #[default]
    Stop,
    Right,
}

impl Direction {
    fn velocity(self) -> i32 {
        match self {
            Direction::Left => -SHIELD_SPEED,
            Direction::Stop => 0,
            Direction::Right => SHIELD_SPEED,
        }
    }
}

/// The player's shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub placement: Placement,
    /// Horizontal velocity, one of -SHIELD_SPEED, 0, SHIELD_SPEED
    pub vx: i32,
}

impl Default for Shield {
    fn default() -> Self {
        Self::new()
    }
}

impl Shield {
    /// A stopped shield centered in the arena
    pub fn new() -> Self {
        let mut shield = Self {
            placement: Placement::new(
                IVec2::new(0, SHIELD_Y),
                IVec2::new(SHIELD_WIDTH, SHIELD_HEIGHT),
                Color::BLUE,
            ),
            vx: 0,
        };
        shield.center_in_arena();
        shield
    }

    pub fn set_intent(&mut self, direction: Direction) {
        self.vx = direction.velocity();
    }

    /// Advance x by the current velocity. Bounds are the engine's job.
    pub fn move_step(&mut self) {
        self.placement.pos.x += self.vx;
    }

    pub fn center_in_arena(&mut self) {
        self.placement.pos.x = ARENA_WIDTH / 2 - self.placement.size.x / 2;
    }

    /// Largest x that keeps the shield inside the arena
    #[inline]
    pub fn max_x(&self) -> i32 {
        ARENA_WIDTH - self.placement.size.x
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::from(&self.placement)
    }
}

/// A brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub id: u32,
    pub placement: Placement,
    pub points: u32,
}

impl Brick {
    pub fn new(id: u32, x: i32, y: i32, points: u32) -> Self {
        Self {
            id,
            placement: Placement::new(
                IVec2::new(x, y),
                IVec2::new(BRICK_WIDTH, BRICK_HEIGHT),
                Color::ORANGE,
            ),
            points,
        }
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::from(&self.placement)
    }
}

/// Row layout for the default board: (first x, y)
pub const BRICK_ROWS: [(i32, i32); 6] = [
    (70, 75),
    (90, 95),
    (110, 115),
    (70, 135),
    (90, 155),
    (110, 175),
];
/// Bricks per row
pub const BRICKS_PER_ROW: i32 = 6;
/// Horizontal distance between brick origins in a row
pub const BRICK_STRIDE: i32 = 120;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    pub shield: Shield,
    /// Live bricks, ordered by id
    pub bricks: Vec<Brick>,
    pub score: u32,
    /// Balls left to serve
    pub balls_remaining: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events raised since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session waiting for the first serve
    pub fn new() -> Self {
        Self {
            ball: Ball::new(),
            shield: Shield::new(),
            bricks: default_layout(),
            score: 0,
            balls_remaining: STARTING_BALLS,
            phase: GamePhase::Serving,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// State with a custom board, for scripted scenarios
    pub fn with_bricks(bricks: Vec<Brick>) -> Self {
        let mut state = Self::new();
        state.bricks = bricks;
        state.bricks.sort_by_key(|b| b.id);
        state
    }

    #[inline]
    pub fn awaiting_serve(&self) -> bool {
        self.phase == GamePhase::Serving
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn brick_sprites(&self) -> Vec<Sprite> {
        self.bricks.iter().map(Brick::sprite).collect()
    }
}

/// The default six staggered rows
pub fn default_layout() -> Vec<Brick> {
    let mut bricks = Vec::with_capacity(BRICK_ROWS.len() * BRICKS_PER_ROW as usize);
    let mut next_id = 1;
    for &(start_x, y) in &BRICK_ROWS {
        for col in 0..BRICKS_PER_ROW {
            bricks.push(Brick::new(next_id, start_x + col * BRICK_STRIDE, y, BRICK_POINTS));
            next_id += 1;
        }
    }
    bricks
}
