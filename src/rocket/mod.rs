//! Rocket thrust/dodge game
//!
//! Steer a rocket into falling targets. Each hit sets off an explosion that
//! can chain through nearby targets for doubling points. A target reaching
//! the bottom edge ends the run.

pub mod state;
pub mod tick;

pub use state::{
    BonusText, Explosion, GameEvent, GamePhase, Particle, ResetReason, Rocket, RocketGame, RocketPhase, Target,
};
pub use tick::{TickInput, tick};
