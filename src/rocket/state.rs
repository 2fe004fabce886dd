//! Rocket game state and entity types
//!
//! All state that must be reproducible from a seed lives here.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use crate::consts::MAX_PENDING_EVENTS;
use crate::heading;
use crate::settings::Settings;
use crate::sim::segment_circle_overlap;
use crate::tuning::{HitTest, RocketTuning};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// A target reached the bottom edge
    GameOver,
}

/// Rocket flight phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RocketPhase {
    /// Coasting on the launch impulse, engine dark
    Launching,
    /// Engine lit, player in control of thrust
    Active,
}

/// Why the rocket was sent back to the launch position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetReason {
    TargetHit,
    Explosion,
    OutOfBounds,
}

/// Things the host may want to react to (sound, screen flash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TargetSpawned { pos: Vec2 },
    /// `generation` is 0 for a direct rocket hit
    TargetDestroyed { pos: Vec2, generation: u32, points: u64 },
    Ignition,
    RocketReset { reason: ResetReason },
    GameOver { score: u64 },
}

/// The player's rocket, a thin stick pivoting on its base
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rocket {
    /// Base of the rocket (exhaust point)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Forces accumulated this frame
    pub acc: Vec2,
    /// Heading in radians, 0 = straight up
    pub angle: f32,
    pub width: f32,
    pub height: f32,
    pub phase: RocketPhase,
    pub apex_reached: bool,
    /// Passes left between apex and ignition
    pub ignition_timer: i32,
}

impl Rocket {
    pub fn new(tuning: &RocketTuning) -> Self {
        let mut rocket = Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            acc: Vec2::ZERO,
            angle: 0.0,
            width: tuning.rocket_width,
            height: tuning.rocket_height,
            phase: RocketPhase::Launching,
            apex_reached: false,
            ignition_timer: 0,
        };
        rocket.reset(tuning);
        rocket
    }

    /// Back to the launch position with the launch impulse
    pub fn reset(&mut self, tuning: &RocketTuning) {
        self.pos = Vec2::new(tuning.width / 2.0, tuning.height + tuning.spawn_offset);
        self.vel = Vec2::new(0.0, -tuning.launch_impulse);
        self.acc = Vec2::ZERO;
        self.angle = 0.0;
        self.apex_reached = false;
        self.ignition_timer = tuning.ignition_delay as i32;
        self.phase = if tuning.launch_sequence {
            RocketPhase::Launching
        } else {
            RocketPhase::Active
        };
    }

    pub fn apply_force(&mut self, force: Vec2) {
        self.acc += force;
    }

    /// Nose of the rocket
    pub fn tip(&self) -> Vec2 {
        self.pos + heading(self.angle) * self.height
    }

    /// One Euler pass: launch sequence, then `vel += acc; pos += vel`.
    ///
    /// Acceleration is consumed by the pass. Returns true when the engine
    /// ignited during this pass.
    pub fn integrate(&mut self) -> bool {
        let mut ignited = false;
        if self.phase == RocketPhase::Launching {
            if self.vel.y >= 0.0 && !self.apex_reached {
                self.apex_reached = true;
            }
            if self.apex_reached {
                self.ignition_timer -= 1;
                if self.ignition_timer <= 0 {
                    self.phase = RocketPhase::Active;
                    ignited = true;
                }
            }
        }

        self.vel += self.acc;
        self.pos += self.vel;
        self.acc = Vec2::ZERO;
        ignited
    }

    /// Whether the rocket touches a circle
    pub fn hits_circle(&self, center: Vec2, radius: f32, hit_test: HitTest) -> bool {
        match hit_test {
            HitTest::Center => self.pos.distance(center) < radius + self.height / 2.0,
            HitTest::Segment => segment_circle_overlap(self.pos, self.tip(), center, radius),
        }
    }

    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        self.pos.y < -self.height
            || self.pos.y > height + self.height
            || self.pos.x < 0.0
            || self.pos.x > width
    }
}

/// Frames an exhaust particle lives
pub const PARTICLE_LIFE: u32 = 60;
/// Per-frame velocity damping of exhaust
pub const PARTICLE_DRAG: f32 = 0.97;

/// An exhaust streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub length: f32,
    pub life: u32,
    pub max_life: u32,
    pub boost: bool,
}

impl Particle {
    /// Exhaust leaving a rocket at `pos`, inheriting the rocket's velocity
    pub fn exhaust(rng: &mut Pcg32, pos: Vec2, rocket_angle: f32, rocket_vel: Vec2, boost: bool) -> Self {
        let mut spread = (rng.random::<f32>() - 0.5) * (PI / 6.0);
        let mut speed = rng.random::<f32>() * 5.0 + 3.0;
        let mut length = rng.random::<f32>() * 5.0 + 2.0;

        if boost {
            speed *= 2.0;
            length *= 2.0;
            spread /= 2.0;
        }

        // Opposite the nose
        let dir = -heading(rocket_angle + spread);
        Self {
            pos,
            vel: rocket_vel + dir * speed,
            length,
            life: PARTICLE_LIFE,
            max_life: PARTICLE_LIFE,
            boost,
        }
    }

    pub fn update(&mut self) {
        self.life = self.life.saturating_sub(1);
        self.vel *= PARTICLE_DRAG;
        self.pos += self.vel;
    }

    /// Direction of travel (drag never changes it)
    pub fn angle(&self) -> f32 {
        self.vel.y.atan2(self.vel.x)
    }

    /// Remaining life, 1 at spawn and 0 when dead
    pub fn progress(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }

    /// Magenta while boosting, otherwise red-orange cooling toward red
    pub fn rgba(&self) -> [f32; 4] {
        let progress = self.progress();
        if self.boost {
            [1.0, 0.0, 1.0, progress]
        } else {
            let green = (100.0 * progress).round() / 255.0;
            [1.0, green, 0.0, progress]
        }
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// A falling target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Height above the top edge where targets appear
pub const TARGET_SPAWN_Y: f32 = -30.0;

impl Target {
    /// New target above the arena, heading down within ±30° of vertical.
    ///
    /// The start position is shifted so the straight path never leaves the
    /// arena sideways before reaching the bottom.
    pub fn spawn(rng: &mut Pcg32, width: f32, height: f32, radius: f32, speed: f32) -> Self {
        let mut pos = Vec2::new(rng.random::<f32>() * width, TARGET_SPAWN_Y);
        let angle = (rng.random::<f32>() - 0.5) * (PI / 3.0);
        let vel = Vec2::new(angle.sin(), angle.cos()) * speed;

        let time_to_bottom = (height + radius) / vel.y;
        let final_x = pos.x + vel.x * time_to_bottom;
        if final_x < 0.0 {
            pos.x = -vel.x * time_to_bottom;
        } else if final_x > width {
            pos.x = width - vel.x * time_to_bottom;
        }

        Self { pos, vel, radius }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Fell past the bottom edge
    pub fn has_landed(&self, height: f32) -> bool {
        self.pos.y > height + self.radius
    }
}

/// Explosion colours by generation (cycled)
pub const EXPLOSION_PALETTE: [[f32; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [1.0, 165.0 / 255.0, 0.0],
    [1.0, 1.0, 0.0],
    [1.0, 1.0, 1.0],
];

/// An expanding blast; destroys targets it touches and spawns the next generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub max_radius: f32,
    pub speed: f32,
    /// Chain depth, starting at 1 for a blast caused by the rocket
    pub generation: u32,
}

impl Explosion {
    pub fn new(pos: Vec2, generation: u32, tuning: &RocketTuning) -> Self {
        let generation = generation.max(1);
        Self {
            pos,
            radius: 1.0,
            max_radius: tuning.explosion_radius * tuning.explosion_falloff.powi(generation as i32 - 1),
            speed: tuning.explosion_speed,
            generation,
        }
    }

    pub fn update(&mut self) {
        self.radius += self.speed;
    }

    pub fn is_spent(&self) -> bool {
        self.radius >= self.max_radius
    }

    /// Points for a target caught by this blast
    pub fn bonus(&self) -> u64 {
        1u64 << self.generation.min(63)
    }

    pub fn rgba(&self) -> [f32; 4] {
        let [r, g, b] = EXPLOSION_PALETTE[self.generation.saturating_sub(1) as usize % EXPLOSION_PALETTE.len()];
        [r, g, b, self.opacity()]
    }

    /// Fades out as it grows
    pub fn opacity(&self) -> f32 {
        (1.0 - self.radius / self.max_radius).max(0.0)
    }
}

/// Frames a score popup stays visible
pub const BONUS_TEXT_LIFE: u32 = 60;

/// Floating "xN" score popup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BonusText {
    pub pos: Vec2,
    pub vel: Vec2,
    pub text: String,
    pub life: u32,
    pub max_life: u32,
}

impl BonusText {
    pub fn new(pos: Vec2, points: u64) -> Self {
        Self {
            pos,
            vel: Vec2::new(0.0, -1.0),
            text: format!("x{}", points),
            life: BONUS_TEXT_LIFE,
            max_life: BONUS_TEXT_LIFE,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life = self.life.saturating_sub(1);
    }

    pub fn opacity(&self) -> f32 {
        self.life as f32 / self.max_life as f32
    }
}

/// Complete rocket game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocketGame {
    pub tuning: RocketTuning,
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    pub rocket: Rocket,
    pub particles: Vec<Particle>,
    pub targets: Vec<Target>,
    pub explosions: Vec<Explosion>,
    pub bonus_texts: Vec<BonusText>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Game clock in milliseconds (advances one frame per tick)
    pub time_ms: f64,
    pub last_target_ms: f64,
    pub spawn_interval_ms: f64,
    /// Particle cap from settings
    pub max_particles: usize,
    /// Whether score popups are spawned
    pub bonus_text: bool,
    /// Events produced since the last drain. Hosts drain this every frame;
    /// past `MAX_PENDING_EVENTS` the oldest are dropped.
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl RocketGame {
    /// Create a new game with the given tuning and seed
    pub fn new(tuning: RocketTuning, seed: u64) -> Self {
        let settings = Settings::default();
        Self {
            rocket: Rocket::new(&tuning),
            spawn_interval_ms: tuning.spawn_interval_ms,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            particles: Vec::new(),
            targets: Vec::new(),
            explosions: Vec::new(),
            bonus_texts: Vec::new(),
            score: 0,
            time_ticks: 0,
            time_ms: 0.0,
            last_target_ms: 0.0,
            max_particles: settings.max_particles(),
            bonus_text: settings.bonus_text,
            events: Vec::new(),
        }
    }

    /// Apply presentation settings (particle cap, popups)
    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.apply_settings(settings);
        self
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.max_particles = settings.max_particles();
        self.bonus_text = settings.bonus_text;
        self.trim_particles();
    }

    /// Back to initial values. The game clock and RNG keep running, so the
    /// spawn timer fires as soon as play resumes.
    pub fn restart(&mut self) {
        self.rocket.reset(&self.tuning);
        self.particles.clear();
        self.targets.clear();
        self.explosions.clear();
        self.bonus_texts.clear();
        self.score = 0;
        self.last_target_ms = 0.0;
        self.spawn_interval_ms = self.tuning.spawn_interval_ms;
        self.phase = GamePhase::Playing;
        log::info!("Rocket game restarted");
    }

    pub fn reset_rocket(&mut self, reason: ResetReason) {
        self.rocket.reset(&self.tuning);
        self.push_event(GameEvent::RocketReset { reason });
    }

    pub fn spawn_target(&mut self) {
        let t = &self.tuning;
        let target = Target::spawn(&mut self.rng, t.width, t.height, t.target_radius, t.target_speed);
        log::debug!("Target spawned at x={:.1}", target.pos.x);
        self.push_event(GameEvent::TargetSpawned { pos: target.pos });
        self.targets.push(target);
    }

    /// Emit one exhaust particle at the rocket base
    pub fn emit_exhaust(&mut self, boost: bool) {
        self.emit_exhaust_from(self.rocket.pos, self.rocket.vel, boost);
    }

    /// Emit one exhaust particle from an earlier rocket position and velocity
    pub fn emit_exhaust_from(&mut self, pos: Vec2, vel: Vec2, boost: bool) {
        if self.max_particles == 0 {
            return;
        }
        let particle = Particle::exhaust(&mut self.rng, pos, self.rocket.angle, vel, boost);
        self.particles.push(particle);
        self.trim_particles();
    }

    /// Drop the oldest particles above the cap
    fn trim_particles(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }

    /// Speed a destroyed target adds to the spawn rate
    pub fn accelerate_spawns(&mut self) {
        self.spawn_interval_ms *= self.tuning.spawn_acceleration;
    }

    pub fn add_bonus_text(&mut self, pos: Vec2, points: u64) {
        if self.bonus_text {
            self.bonus_texts.push(BonusText::new(pos, points));
        }
    }

    /// Roll the RNG (autopilot and effects share the game stream)
    pub fn random(&mut self) -> f32 {
        self.rng.random()
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
