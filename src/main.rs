//! Arcade Kit entry point
//!
//! Native builds run either game headless and log what happened:
//!
//! ```text
//! arcade-kit rocket [frames] [seed] [classic|modern]
//! arcade-kit ball [level.json] [frames]
//! ```
//!
//! `ARCADE_KIT_SETTINGS` may point at a settings JSON file.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Web hosts drive the library directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use anyhow::{Context, Result, bail};
    use glam::Vec2;
    use std::path::Path;
    use std::str::FromStr;

    use arcade_kit::ball::{self, BallEvent, BallGame, BallInput, BallPhase, Level, PolygonKind};
    use arcade_kit::consts::FRAME_MS;
    use arcade_kit::renderer::{DrawList, ball_scene, rocket_scene, tessellate};
    use arcade_kit::rocket::{self, GameEvent, GamePhase, RocketGame, TickInput};
    use arcade_kit::sim::FrameClock;
    use arcade_kit::{BallTuning, RocketPreset, RocketTuning, Settings};

    const DEFAULT_FRAMES: u64 = 3600;
    const DEFAULT_SEED: u64 = 42;
    /// Simulated display rate; the frame clock keeps the games at 60 steps/s
    const HOST_FPS: f64 = 144.0;

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let settings = match std::env::var_os("ARCADE_KIT_SETTINGS") {
            Some(path) => Settings::load(Path::new(&path)),
            None => Settings::default(),
        };
        let rest = args.get(1..).unwrap_or_default();

        match args.first().map(String::as_str) {
            None | Some("rocket") => run_rocket(rest, &settings),
            Some("ball") => run_ball(rest, &settings),
            Some(other) => bail!("unknown game '{}', expected 'rocket' or 'ball'", other),
        }
    }

    fn parse_arg<T>(args: &[String], index: usize, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        match args.get(index) {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("invalid {} '{}'", name, raw)),
            None => Ok(default),
        }
    }

    /// Step the clock one host frame and return how many ticks to run
    fn host_frame(clock: &mut FrameClock, frame: u64) -> u32 {
        clock.advance_to(frame as f64 * 1000.0 / HOST_FPS)
    }

    fn log_frame(list: &DrawList, settings: &Settings) {
        let vertices = tessellate(list, settings.quality.circle_segments());
        log::info!(
            "Final frame: {} draw commands, {} vertices",
            list.len(),
            vertices.len()
        );
    }

    fn run_rocket(args: &[String], settings: &Settings) -> Result<()> {
        let frames = parse_arg(args, 0, "frame count", DEFAULT_FRAMES)?;
        let seed = parse_arg(args, 1, "seed", DEFAULT_SEED)?;
        let preset = match args.get(2) {
            Some(name) => RocketPreset::from_str(name).with_context(|| format!("unknown preset '{}'", name))?,
            None => RocketPreset::default(),
        };

        log::info!(
            "Rocket ({}) seed={} frames={}",
            preset.as_str(),
            seed,
            frames
        );
        let mut game = RocketGame::new(RocketTuning::preset(preset), seed).with_settings(settings);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut clock = FrameClock::new();
        let mut host_frames = 0;
        let (mut destroyed, mut resets) = (0u32, 0u32);

        while clock.steps < frames && game.phase == GamePhase::Playing {
            host_frames += 1;
            for _ in 0..host_frame(&mut clock, host_frames) {
                rocket::tick(&mut game, &input);
            }
            for event in game.drain_events() {
                match event {
                    GameEvent::TargetDestroyed { .. } => destroyed += 1,
                    GameEvent::RocketReset { .. } => resets += 1,
                    _ => {}
                }
            }
        }

        log::info!(
            "Rocket finished after {} ticks ({} host frames): score={} destroyed={} resets={} game_over={}",
            game.time_ticks,
            host_frames,
            game.score,
            destroyed,
            resets,
            game.phase == GamePhase::GameOver
        );
        log_frame(&rocket_scene(&game), settings);
        Ok(())
    }

    /// Pull toward the goal in bursts so the ball swings between tugs
    fn scripted_input(game: &BallGame, tick: u64) -> BallInput {
        let aim = game
            .level
            .polygons
            .iter()
            .find(|p| p.kind == PolygonKind::Goal)
            .map(|goal| goal.centroid())
            .unwrap_or_else(|| game.level.cage.center());
        BallInput {
            pointer: Some(aim),
            pressed: tick % 120 < 90,
            restart: false,
        }
    }

    fn run_ball(args: &[String], settings: &Settings) -> Result<()> {
        let level = match args.first() {
            Some(path) => Level::load(Path::new(path)).with_context(|| format!("failed to load level {}", path))?,
            None => Level::demo(),
        };
        let frames = parse_arg(args, 1, "frame count", DEFAULT_FRAMES)?;

        log::info!("Ball puzzle '{}' frames={}", level.name, frames);
        let mut game = BallGame::new(level, BallTuning::default());
        let mut clock = FrameClock::new();
        let mut host_frames = 0;
        let (mut bounces, mut barriers) = (0u32, 0u32);

        while clock.steps < frames && game.phase == BallPhase::Playing {
            host_frames += 1;
            for _ in 0..host_frame(&mut clock, host_frames) {
                let input = scripted_input(&game, clock.steps);
                ball::tick(&mut game, &input);
            }
            for event in game.drain_events() {
                match event {
                    BallEvent::Bounced { .. } => bounces += 1,
                    BallEvent::BarrierHit { .. } => barriers += 1,
                    BallEvent::GoalReached { .. } => {}
                }
            }
        }

        let elapsed_secs = game.time_ticks as f64 * FRAME_MS / 1000.0;
        log::info!(
            "Ball finished after {} ticks ({:.1}s): won={} bounces={} barrier_hits={} final_pos={}",
            game.time_ticks,
            elapsed_secs,
            game.phase == BallPhase::Won,
            bounces,
            barriers,
            Vec2::new(game.ball.pos.x.round(), game.ball.pos.y.round())
        );
        log_frame(&ball_scene(&game, settings), settings);
        Ok(())
    }
}
