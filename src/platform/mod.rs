//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input events (held direction flags, launch, pause)
//! - Terminals that report key presses but not releases

pub mod input;

pub use input::{InputEvent, KeyHold};
