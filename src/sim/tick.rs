//! Fixed timestep simulation tick
//!
//! Advances shield and ball one step and resolves impacts. The directional
//! checks run in a fixed order (bottom, left, right, top) and each one reads
//! the velocity as left by the checks before it.

use super::collision::{Edge, edge_contact, strike_bricks, wall_contact};
use super::state::{Brick, Direction, GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Held movement keys, sampled once at the start of each tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.time_ticks += 1;

    move_shield(state, input);

    if state.ball.vel.y > 0 && check_bottom(state) {
        // Ball left play; nothing else moves this tick
        return;
    }
    if state.ball.vel.x < 0 {
        check_left(state);
    }
    if state.ball.vel.x > 0 {
        check_right(state);
    }
    if state.ball.vel.y < 0 {
        check_top(state);
    }

    state.ball.move_step();
}

/// Serve a new ball. Returns false if the state is not awaiting a serve.
pub fn launch(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Serving {
        return false;
    }
    let Some(remaining) = state.balls_remaining.checked_sub(1) else {
        return false;
    };

    state.balls_remaining = remaining;
    state.ball.serve();
    state.shield.center_in_arena();
    state.phase = GamePhase::Active;
    state.events.push(GameEvent::Launched {
        balls_remaining: remaining,
    });
    log::info!("Ball served ({} in reserve)", remaining);
    true
}

fn move_shield(state: &mut GameState, input: &TickInput) {
    let shield = &mut state.shield;
    let direction = match (input.left, input.right) {
        (false, true) if shield.placement.right() < ARENA_WIDTH => Direction::Right,
        (true, false) if shield.placement.left() > 0 => Direction::Left,
        // Nothing held, both held, or already flush with the wall
        _ => Direction::Stop,
    };
    shield.set_intent(direction);
    shield.move_step();

    let max_x = shield.max_x();
    shield.placement.pos.x = shield.placement.pos.x.clamp(0, max_x);
}

/// Returns true if the ball was lost
fn check_bottom(state: &mut GameState) -> bool {
    if wall_contact(&state.ball.placement, Edge::Bottom) {
        ball_lost(state);
        return true;
    }

    if edge_contact(&state.ball.placement, &state.shield.placement, Edge::Bottom) {
        state.ball.flip_vy();
    }

    let struck = strike_bricks(&mut state.ball, &mut state.bricks, Edge::Bottom);
    award(state, struck);
    false
}

fn check_left(state: &mut GameState) {
    if wall_contact(&state.ball.placement, Edge::Left) {
        state.ball.flip_vx();
    }

    if edge_contact(&state.ball.placement, &state.shield.placement, Edge::Left) {
        state.ball.flip_vx();
    }

    let struck = strike_bricks(&mut state.ball, &mut state.bricks, Edge::Left);
    award(state, struck);
}

fn check_right(state: &mut GameState) {
    // Wall takes priority; the shield is only tested if the wall missed
    if wall_contact(&state.ball.placement, Edge::Right) {
        state.ball.flip_vx();
    } else if edge_contact(&state.ball.placement, &state.shield.placement, Edge::Right) {
        state.ball.flip_vx();
    }

    let struck = strike_bricks(&mut state.ball, &mut state.bricks, Edge::Right);
    award(state, struck);
}

fn check_top(state: &mut GameState) {
    if wall_contact(&state.ball.placement, Edge::Top) {
        state.ball.flip_vy();
    }

    let struck = strike_bricks(&mut state.ball, &mut state.bricks, Edge::Top);
    award(state, struck);
}

fn award(state: &mut GameState, struck: Vec<Brick>) {
    if struck.is_empty() {
        return;
    }
    for brick in &struck {
        state.score += brick.points;
        state.events.push(GameEvent::BrickDestroyed {
            id: brick.id,
            points: brick.points,
        });
        log::debug!("Brick {} destroyed, score {}", brick.id, state.score);
    }
    if state.bricks.is_empty() {
        state.events.push(GameEvent::BoardCleared);
        log::info!("Board cleared with score {}", state.score);
    }
}

fn ball_lost(state: &mut GameState) {
    state.ball.halt();
    state.phase = GamePhase::Serving;
    state.events.push(GameEvent::BallLost {
        balls_remaining: state.balls_remaining,
    });
    log::debug!("Ball lost at tick {}", state.time_ticks);

    if state.balls_remaining == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            final_score: state.score,
        });
        log::info!("Game over, final score {}", state.score);
    }
}
