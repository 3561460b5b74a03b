//! Character-grid frame built from entity snapshots
//!
//! The arena is sampled onto a grid of `CELL_WIDTH` x `CELL_HEIGHT` pixel
//! cells. A rectangle covers every cell its pixels touch.

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::highscores::ScoreLedger;
use crate::session::Session;
use crate::sim::{Color, Sprite};

/// Arena pixels per cell, horizontally
pub const CELL_WIDTH: i32 = 9;
/// Arena pixels per cell, vertically (terminal cells are about twice as tall as wide)
pub const CELL_HEIGHT: i32 = 18;

pub const BALL_GLYPH: char = 'O';
pub const SHIELD_GLYPH: char = '=';
pub const BRICK_GLYPH: char = '#';
pub const EMPTY_GLYPH: char = ' ';

/// One grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    const EMPTY: Cell = Cell {
        glyph: EMPTY_GLYPH,
        color: Color::WHITE,
    };
}

/// What the status line should say
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    AwaitingServe,
    Paused,
    GameOver,
}

impl Status {
    pub fn message(self) -> &'static str {
        match self {
            Status::Playing => "",
            Status::AwaitingServe => "PRESS SPACE TO LAUNCH",
            Status::Paused => "PAUSED - PRESS P TO RESUME",
            Status::GameOver => "GAME OVER",
        }
    }
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub ball: Sprite,
    pub shield: Sprite,
    pub bricks: Vec<Sprite>,
    pub score: u32,
    pub balls_remaining: u32,
    pub status: Status,
}

impl Scene {
    pub fn capture<L: ScoreLedger>(session: &Session<L>) -> Self {
        let status = if session.is_game_over() {
            Status::GameOver
        } else if session.is_paused() {
            Status::Paused
        } else if session.awaiting_serve() {
            Status::AwaitingServe
        } else {
            Status::Playing
        };
        Self {
            ball: session.ball_snapshot(),
            shield: session.shield_snapshot(),
            bricks: session.brick_snapshots(),
            score: session.score(),
            balls_remaining: session.balls_remaining(),
            status,
        }
    }
}

/// Rasterized arena plus HUD text
#[derive(Debug, Clone)]
pub struct Frame {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
    pub hud: String,
    pub status: String,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    /// Grid sized to cover the whole arena
    pub fn new() -> Self {
        let cols = (ARENA_WIDTH + CELL_WIDTH - 1) / CELL_WIDTH;
        let rows = (ARENA_HEIGHT + CELL_HEIGHT - 1) / CELL_HEIGHT;
        Self {
            cols: cols as usize,
            rows: rows as usize,
            cells: vec![Cell::EMPTY; (cols * rows) as usize],
            hud: String::new(),
            status: String::new(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<&Cell> {
        (col < self.cols && row < self.rows).then(|| &self.cells[row * self.cols + col])
    }

    /// Rows of cells, top to bottom
    pub fn lines(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols)
    }

    /// Rows as plain text (glyphs only)
    pub fn text_lines(&self) -> Vec<String> {
        self.lines()
            .map(|row| row.iter().map(|c| c.glyph).collect())
            .collect()
    }

    /// Redraw from a scene
    pub fn draw(&mut self, scene: &Scene) {
        self.cells.fill(Cell::EMPTY);
        self.fill_sprite(&scene.ball, BALL_GLYPH);
        self.fill_sprite(&scene.shield, SHIELD_GLYPH);
        for brick in &scene.bricks {
            self.fill_sprite(brick, BRICK_GLYPH);
        }

        let left = format!("Balls: {}", scene.balls_remaining);
        let right = format!("SCORE: {}", scene.score);
        let gap = self.cols.saturating_sub(left.len() + right.len()).max(1);
        self.hud = format!("{left}{}{right}", " ".repeat(gap));
        self.status = scene.status.message().to_string();
    }

    fn fill_sprite(&mut self, sprite: &Sprite, glyph: char) {
        let Some((c0, c1)) = cover(sprite.x, sprite.width, CELL_WIDTH, self.cols) else {
            return;
        };
        let Some((r0, r1)) = cover(sprite.y, sprite.height, CELL_HEIGHT, self.rows) else {
            return;
        };
        let cell = Cell {
            glyph,
            color: sprite.color,
        };
        for row in r0..=r1 {
            let start = row * self.cols;
            self.cells[start + c0..=start + c1].fill(cell);
        }
    }
}

/// Cell range touched by the pixel span `[start, start + len)`, clipped to
/// `count` cells
fn cover(start: i32, len: i32, cell: i32, count: usize) -> Option<(usize, usize)> {
    let first = start.div_euclid(cell).max(0);
    let last = (start + len - 1).div_euclid(cell).min(count as i32 - 1);
    (len > 0 && first <= last).then(|| (first as usize, last as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highscores::MemoryLedger;

    #[test]
    fn test_grid_covers_arena() {
        let frame = Frame::new();
        assert_eq!(frame.cols(), 88);
        assert_eq!(frame.rows(), 32);
    }

    #[test]
    fn test_cover() {
        assert_eq!(cover(0, 9, 9, 88), Some((0, 0)));
        assert_eq!(cover(0, 10, 9, 88), Some((0, 1)));
        assert_eq!(cover(-2, 20, 9, 88), Some((0, 1)));
        assert_eq!(cover(-20, 10, 9, 88), None);
        assert_eq!(cover(780, 20, 9, 88), Some((86, 87)));
    }

    #[test]
    fn test_fresh_session_frame() {
        let session = Session::new(MemoryLedger::default());
        let mut frame = Frame::new();
        frame.draw(&Scene::capture(&session));

        // Ball (100,200) 20x20 -> cols 11..=13, rows 11..=12
        assert_eq!(frame.cell(11, 11).map(|c| c.glyph), Some(BALL_GLYPH));
        assert_eq!(frame.cell(13, 12).map(|c| c.glyph), Some(BALL_GLYPH));
        // Shield (353,500) 80x13 -> cols 39..=48, row 27
        assert_eq!(frame.cell(39, 27).map(|c| c.glyph), Some(SHIELD_GLYPH));
        assert_eq!(frame.cell(48, 27).map(|c| c.glyph), Some(SHIELD_GLYPH));
        assert_eq!(frame.cell(49, 27).map(|c| c.glyph), Some(EMPTY_GLYPH));
        // First brick (70,75) -> col 7, row 4
        assert_eq!(
            frame.cell(7, 4).copied(),
            Some(Cell {
                glyph: BRICK_GLYPH,
                color: Color::ORANGE
            })
        );

        assert!(frame.hud.starts_with("Balls: 3"));
        assert!(frame.hud.ends_with("SCORE: 0"));
        assert_eq!(frame.hud.len(), frame.cols());
        assert_eq!(frame.status, Status::AwaitingServe.message());
    }

    #[test]
    fn test_redraw_clears_previous() {
        let mut session = Session::new(MemoryLedger::default());
        session.launch();
        let mut frame = Frame::new();
        frame.draw(&Scene::capture(&session));
        for _ in 0..10 {
            session.tick();
        }
        frame.draw(&Scene::capture(&session));

        let balls: usize = frame
            .text_lines()
            .iter()
            .map(|l| l.chars().filter(|&c| c == BALL_GLYPH).count())
            .sum();
        // 20x20 ball at (140,240) -> 3 cols x 2 rows
        assert_eq!(balls, 6);
        assert_eq!(frame.status, "");
    }
}
