//! Input intent
//!
//! Key events only ever toggle the held-direction flags or trigger a discrete
//! action. The flags are read once at the start of each tick.

use serde::{Deserialize, Serialize};

/// Discrete input delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    LeftPressed,
    LeftReleased,
    RightPressed,
    RightReleased,
    Launch,
    TogglePause,
}

/// Synthesizes key releases for hosts that only report presses.
///
/// Each press (including auto-repeat) keeps the key held for `hold_ticks`
/// ticks; `expire` is called once per tick and reports keys whose hold ran
/// out.
#[derive(Debug, Clone)]
pub struct KeyHold {
    hold_ticks: u32,
    left_ttl: u32,
    right_ttl: u32,
}

impl KeyHold {
    pub fn new(hold_ticks: u32) -> Self {
        Self {
            hold_ticks: hold_ticks.max(1),
            left_ttl: 0,
            right_ttl: 0,
        }
    }

    /// Record a press. Returns the events to forward, including a release
    /// of the opposite direction if it was still held.
    pub fn press(&mut self, event: InputEvent) -> Vec<InputEvent> {
        let mut events = Vec::with_capacity(2);
        match event {
            InputEvent::LeftPressed => {
                if self.right_ttl > 0 {
                    self.right_ttl = 0;
                    events.push(InputEvent::RightReleased);
                }
                self.left_ttl = self.hold_ticks;
            }
            InputEvent::RightPressed => {
                if self.left_ttl > 0 {
                    self.left_ttl = 0;
                    events.push(InputEvent::LeftReleased);
                }
                self.right_ttl = self.hold_ticks;
            }
            _ => {}
        }
        events.push(event);
        events
    }

    /// Count down one tick and return releases that fell due
    pub fn expire(&mut self) -> Vec<InputEvent> {
        let mut released = Vec::new();
        if step(&mut self.left_ttl) {
            released.push(InputEvent::LeftReleased);
        }
        if step(&mut self.right_ttl) {
            released.push(InputEvent::RightReleased);
        }
        released
    }

    /// Forget all held keys
    pub fn reset(&mut self) {
        self.left_ttl = 0;
        self.right_ttl = 0;
    }
}

/// Returns true when the countdown just reached zero
fn step(ttl: &mut u32) -> bool {
    if *ttl == 0 {
        return false;
    }
    *ttl -= 1;
    *ttl == 0
}
