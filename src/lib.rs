//! Arcade Kit - small 2D arcade games as deterministic simulations
//!
//! Core modules:
//! - `sim`: Shared physics (geometry, collision response, frame clock)
//! - `rocket`: Rocket thrust/dodge game
//! - `ball`: Ball-in-polygon puzzle, level files and the level editor
//! - `renderer`: Renderer-agnostic draw lists and triangle tessellation
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance (one preset per game revision)

pub mod ball;
pub mod renderer;
pub mod rocket;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{BallTuning, RocketPreset, RocketTuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation step (one display frame at 60 Hz).
    /// All velocities and forces are expressed per frame.
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Frame length in milliseconds, used by spawn timers
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum substeps per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical playfield size
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Undrained events a game keeps before discarding the oldest
    pub const MAX_PENDING_EVENTS: usize = 1024;
}

/// Unit direction a body points at for a heading angle.
///
/// Screen coordinates (y grows downward); angle 0 points straight up and
/// positive angles turn clockwise.
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

/// Inverse of [`heading`]: the angle whose heading is parallel to `dir`
#[inline]
pub fn heading_angle(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y)
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
