//! Data-driven game balance
//!
//! Every revision of a game is a tuning preset over the same simulation.
//! Tunings serialize to JSON so new balance passes don't need code changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::Rect;

/// Named rocket game revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RocketPreset {
    /// Always-on engine and chain reactions only, in the fixed 800×600 arena
    Classic,
    /// Launch sequence, boost/cut controls, hits reset the rocket
    #[default]
    Modern,
}

impl RocketPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RocketPreset::Classic => "classic",
            RocketPreset::Modern => "modern",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "v1" => Some(RocketPreset::Classic),
            "modern" | "v2" => Some(RocketPreset::Modern),
            _ => None,
        }
    }
}

/// How the rocket is tested against circles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HitTest {
    /// Rocket base point against `radius + height / 2`
    Center,
    /// Rocket body segment (base to tip) against the circle
    Segment,
}

/// Rocket game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocketTuning {
    /// Arena size
    pub width: f32,
    pub height: f32,

    /// Gravity (pixels/frame²)
    pub gravity: f32,
    /// Base engine thrust (pixels/frame²)
    pub thrust: f32,
    /// Thrust multiplier while boosting
    pub boost_multiplier: f32,
    /// Whether the player controls boost/cut (otherwise the engine is always on)
    pub thrust_control: bool,
    /// Rotation per frame while turning (radians)
    pub rotation_speed: f32,
    /// Chance per frame of spawning an exhaust particle while thrusting
    pub exhaust_chance: f32,

    /// Rocket body
    pub rocket_width: f32,
    pub rocket_height: f32,
    /// Respawn distance below the bottom edge (negative = above it)
    pub spawn_offset: f32,
    /// Upward speed given on respawn
    pub launch_impulse: f32,
    /// Coast to apex, then wait before the engine lights
    pub launch_sequence: bool,
    /// Frames between apex and ignition
    pub ignition_delay: u32,
    /// Particles emitted at ignition
    pub ignition_burst: u32,
    /// Euler passes per frame (later revisions integrate twice)
    pub integration_passes: u32,

    /// Target radius
    pub target_radius: f32,
    /// Target fall speed (pixels/frame)
    pub target_speed: f32,
    /// Initial time between target spawns (ms)
    pub spawn_interval_ms: f64,
    /// Spawn interval multiplier per destroyed target
    pub spawn_acceleration: f64,

    /// First-generation explosion radius; later generations shrink by `explosion_falloff`
    pub explosion_radius: f32,
    pub explosion_falloff: f32,
    /// Explosion growth per frame
    pub explosion_speed: f32,

    pub hit_test: HitTest,
    /// Rocket respawns after destroying a target
    pub reset_on_hit: bool,
    /// Touching a live explosion respawns the rocket
    pub explosions_hurt: bool,
}

impl RocketTuning {
    pub fn preset(preset: RocketPreset) -> Self {
        match preset {
            RocketPreset::Classic => Self::classic(),
            RocketPreset::Modern => Self::modern(),
        }
    }

    /// First revision: the engine never stops, rotation is the only control
    pub fn classic() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            gravity: 0.05,
            thrust: 0.15,
            boost_multiplier: 1.0,
            thrust_control: false,
            rotation_speed: 0.05,
            exhaust_chance: 0.7,
            rocket_width: 4.0,
            rocket_height: 20.0,
            spawn_offset: -30.0,
            launch_impulse: 0.0,
            launch_sequence: false,
            ignition_delay: 0,
            ignition_burst: 0,
            integration_passes: 1,
            target_radius: 30.0,
            target_speed: 1.0,
            spawn_interval_ms: 3000.0,
            spawn_acceleration: 0.99,
            explosion_radius: 200.0,
            explosion_falloff: 0.8,
            explosion_speed: 1.5,
            hit_test: HitTest::Center,
            reset_on_hit: false,
            explosions_hurt: false,
        }
    }

    /// Later revision: ballistic launch, boost/cut, and riskier explosions
    pub fn modern() -> Self {
        Self {
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            gravity: 0.0375,
            thrust: 0.06,
            boost_multiplier: 4.0,
            thrust_control: true,
            rotation_speed: 0.05,
            exhaust_chance: 0.7,
            rocket_width: 4.0,
            rocket_height: 20.0,
            spawn_offset: 20.0,
            launch_impulse: 1.875,
            launch_sequence: true,
            ignition_delay: 20,
            ignition_burst: 20,
            integration_passes: 2,
            target_radius: 18.0,
            target_speed: 1.0,
            spawn_interval_ms: 3000.0,
            spawn_acceleration: 0.99,
            explosion_radius: 80.0,
            explosion_falloff: 0.8,
            explosion_speed: 1.5,
            hit_test: HitTest::Segment,
            reset_on_hit: true,
            explosions_hurt: true,
        }
    }

    /// Parse a tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for RocketTuning {
    fn default() -> Self {
        Self::preset(RocketPreset::default())
    }
}

/// How the effector pulls the ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PullMode {
    /// Fixed-magnitude pull toward the effector
    Constant { strength: f32 },
    /// Hooke pull proportional to distance, capped at `max_force`
    Spring { stiffness: f32, max_force: f32 },
}

/// Ball puzzle balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallTuning {
    /// Gravity (pixels/frame²)
    pub gravity: Vec2,
    pub pull: PullMode,
    pub ball_radius: f32,
    pub effector_radius: f32,
    /// Restitution against the arena bounds
    pub wall_restitution: f32,
    /// Restitution against wall polygons
    pub polygon_restitution: f32,
    /// Speed cap (pixels/frame)
    pub max_speed: f32,
}

impl BallTuning {
    /// First revision: constant pull of twice gravity
    pub fn constant_pull() -> Self {
        Self {
            pull: PullMode::Constant { strength: 1.0 },
            ..Self::default()
        }
    }

    /// Parse a tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for BallTuning {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, 0.5),
            pull: PullMode::Spring {
                stiffness: 0.01,
                max_force: 1.5,
            },
            ball_radius: 20.0,
            effector_radius: 10.0,
            wall_restitution: 0.9,
            polygon_restitution: 0.8,
            max_speed: 30.0,
        }
    }
}

/// The cage the effector is confined to, centered on the arena
pub fn default_cage(width: f32, height: f32) -> Rect {
    Rect::centered(Vec2::new(width / 2.0, height / 2.0), 200.0, 200.0)
}
