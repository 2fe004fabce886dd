//! Ball puzzle state

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::level::Level;
use crate::consts::MAX_PENDING_EVENTS;
use crate::tuning::{BallTuning, PullMode};

/// Current phase of a puzzle attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BallPhase {
    Playing,
    /// Ball reached a goal; the simulation is frozen until restart
    Won,
}

/// Things the host may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BallEvent {
    /// Ball struck a wall polygon hard enough to be heard
    Bounced { polygon: usize, speed: f32 },
    /// Ball touched a barrier and went back to the start
    BarrierHit { polygon: usize },
    GoalReached { polygon: usize, ticks: u64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }
}

/// The pointer-driven attractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Effector {
    pub pos: Vec2,
    pub radius: f32,
    /// Pulling this frame (pointer held)
    pub engaged: bool,
}

/// Complete ball puzzle state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallGame {
    pub tuning: BallTuning,
    pub level: Level,
    pub phase: BallPhase,
    pub ball: Ball,
    pub effector: Effector,
    /// Ticks since the attempt started
    pub time_ticks: u64,
    /// Times the ball was sent back to the start
    pub resets: u32,
    /// Events produced since the last drain. Hosts drain this every frame;
    /// past `MAX_PENDING_EVENTS` the oldest are dropped.
    #[serde(skip)]
    pub events: Vec<BallEvent>,
}

impl BallGame {
    pub fn new(level: Level, tuning: BallTuning) -> Self {
        let ball = Ball::new(level.ball_start, tuning.ball_radius);
        let effector = Effector {
            pos: level.cage.center(),
            radius: tuning.effector_radius,
            engaged: false,
        };
        Self {
            tuning,
            level,
            phase: BallPhase::Playing,
            ball,
            effector,
            time_ticks: 0,
            resets: 0,
            events: Vec::new(),
        }
    }

    /// Start the level over
    pub fn restart(&mut self) {
        self.ball = Ball::new(self.level.ball_start, self.tuning.ball_radius);
        self.effector.pos = self.level.cage.center();
        self.effector.engaged = false;
        self.phase = BallPhase::Playing;
        self.time_ticks = 0;
        self.resets = 0;
        log::info!("Level '{}' restarted", self.level.name);
    }

    /// Send the ball back to the start, keeping the clock running
    pub fn reset_ball(&mut self) {
        self.ball.pos = self.level.ball_start;
        self.ball.vel = Vec2::ZERO;
        self.resets += 1;
    }

    /// Move the effector toward a pointer position, staying inside the cage
    pub fn move_effector(&mut self, pointer: Vec2) {
        self.effector.pos = self.level.cage.clamp_point(pointer, self.effector.radius);
    }

    /// Force the engaged effector applies to the ball this frame
    pub fn pull_force(&self) -> Vec2 {
        if !self.effector.engaged {
            return Vec2::ZERO;
        }
        let delta = self.effector.pos - self.ball.pos;
        let dist = delta.length();
        if dist <= f32::EPSILON {
            return Vec2::ZERO;
        }
        match self.tuning.pull {
            PullMode::Constant { strength } => delta / dist * strength,
            PullMode::Spring {
                stiffness,
                max_force,
            } => (delta * stiffness).clamp_length_max(max_force),
        }
    }

    /// Tether endpoints from the effector rim to the ball rim, if they are apart
    pub fn tether(&self) -> Option<(Vec2, Vec2)> {
        let delta = self.ball.pos - self.effector.pos;
        let dist = delta.length();
        if dist <= self.ball.radius + self.effector.radius {
            return None;
        }
        let dir = delta / dist;
        Some((
            self.effector.pos + dir * self.effector.radius,
            self.ball.pos - dir * self.ball.radius,
        ))
    }

    /// Queue an event, dropping the oldest once the queue is full
    pub fn push_event(&mut self, event: BallEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<BallEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> BallGame {
        BallGame::new(Level::default(), BallTuning::default())
    }

    #[test]
    fn test_new_game_starts_at_level_start() {
        let game = game();
        assert_eq!(game.ball.pos, Level::default().ball_start);
        assert_eq!(game.effector.pos, Vec2::new(400.0, 300.0));
        assert_eq!(game.phase, BallPhase::Playing);
    }

    #[test]
    fn test_effector_clamped_to_cage() {
        let mut game = game();
        game.move_effector(Vec2::new(0.0, 0.0));
        assert_eq!(game.effector.pos, Vec2::new(310.0, 210.0));
        game.move_effector(Vec2::new(450.0, 250.0));
        assert_eq!(game.effector.pos, Vec2::new(450.0, 250.0));
    }

    #[test]
    fn test_pull_requires_engagement() {
        let mut game = game();
        assert_eq!(game.pull_force(), Vec2::ZERO);
        game.effector.engaged = true;
        assert!(game.pull_force().length() > 0.0);
    }

    #[test]
    fn test_spring_pull_is_capped() {
        let mut game = game();
        game.ball.pos = Vec2::new(400.0, 500.0);
        game.effector.pos = Vec2::new(400.0, 300.0);
        game.effector.engaged = true;
        let force = game.pull_force();
        assert!((force - Vec2::new(0.0, -1.5)).length() < 1e-5);

        game.ball.pos = Vec2::new(400.0, 350.0);
        let force = game.pull_force();
        assert!((force - Vec2::new(0.0, -0.5)).length() < 1e-5);
    }

    #[test]
    fn test_constant_pull_ignores_distance() {
        let mut game = BallGame::new(Level::default(), BallTuning::constant_pull());
        game.effector.engaged = true;
        game.effector.pos = Vec2::new(400.0, 300.0);
        game.ball.pos = Vec2::new(100.0, 300.0);
        assert!((game.pull_force() - Vec2::new(1.0, 0.0)).length() < 1e-5);
        game.ball.pos = Vec2::new(390.0, 300.0);
        assert!((game.pull_force() - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_pull_zero_when_coincident() {
        let mut game = game();
        game.effector.engaged = true;
        game.ball.pos = game.effector.pos;
        assert_eq!(game.pull_force(), Vec2::ZERO);
    }

    #[test]
    fn test_tether_spans_rims() {
        let mut game = game();
        game.effector.pos = Vec2::new(400.0, 300.0);
        game.ball.pos = Vec2::new(400.0, 400.0);
        let (from, to) = game.tether().unwrap();
        assert!((from - Vec2::new(400.0, 310.0)).length() < 1e-4);
        assert!((to - Vec2::new(400.0, 380.0)).length() < 1e-4);

        game.ball.pos = Vec2::new(400.0, 320.0);
        assert!(game.tether().is_none());
    }

    #[test]
    fn test_restart_clears_progress() {
        let mut game = game();
        game.ball.pos = Vec2::new(700.0, 100.0);
        game.ball.vel = Vec2::new(3.0, 3.0);
        game.phase = BallPhase::Won;
        game.reset_ball();
        assert_eq!(game.resets, 1);
        game.restart();
        assert_eq!(game.resets, 0);
        assert_eq!(game.ball.vel, Vec2::ZERO);
        assert_eq!(game.phase, BallPhase::Playing);
    }

    #[test]
    fn test_event_queue_is_capped() {
        let mut game = game();
        for polygon in 0..MAX_PENDING_EVENTS + 5 {
            game.push_event(BallEvent::BarrierHit { polygon });
        }
        assert_eq!(game.events.len(), MAX_PENDING_EVENTS);
        assert_eq!(game.events[0], BallEvent::BarrierHit { polygon: 5 });
    }
}
