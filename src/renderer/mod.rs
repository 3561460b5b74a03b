//! Rendering module
//!
//! Turns entity snapshots into a character grid. Drawing the grid on a real
//! terminal is left to the binary.

pub mod frame;

pub use frame::{Cell, Frame, Scene, Status};
