//! Per-frame simulation step for the ball puzzle
//!
//! Order: restart, win check, effector, forces, speed cap, then sub-stepped
//! integration with polygon contacts and arena bounds.

use glam::Vec2;

use super::level::PolygonKind;
use super::state::{BallEvent, BallGame, BallPhase};
use crate::sim::{ball_polygon_collision, bounce_in_bounds, resolve_collision};

/// Impacts slower than this (pixels/frame) don't produce a bounce event
const BOUNCE_EVENT_SPEED: f32 = 1.0;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct BallInput {
    /// Pointer position in arena coordinates, if over the arena
    pub pointer: Option<Vec2>,
    /// Pointer held down: the effector pulls
    pub pressed: bool,
    /// Start the level over
    pub restart: bool,
}

enum Contact {
    Clear,
    Barrier(usize),
    Goal(usize),
}

/// Advance the puzzle by one frame
pub fn tick(game: &mut BallGame, input: &BallInput) {
    if input.restart {
        game.restart();
    }

    if game.phase == BallPhase::Won {
        return;
    }

    if let Some(pointer) = input.pointer {
        game.move_effector(pointer);
    }
    game.effector.engaged = input.pressed;

    game.time_ticks += 1;

    let force = game.tuning.gravity + game.pull_force();
    game.ball.vel = (game.ball.vel + force).clamp_length_max(game.tuning.max_speed);

    // No sub-step may move the ball further than half its radius
    let max_step = (game.ball.radius * 0.5).max(1.0);
    let steps = (game.ball.vel.length() / max_step).ceil().max(1.0) as u32;

    for _ in 0..steps {
        game.ball.pos += game.ball.vel / steps as f32;

        match resolve_contacts(game) {
            Contact::Clear => {}
            Contact::Barrier(polygon) => {
                log::debug!("Barrier {} hit, ball back to start", polygon);
                game.reset_ball();
                game.push_event(BallEvent::BarrierHit { polygon });
                return;
            }
            Contact::Goal(polygon) => {
                game.phase = BallPhase::Won;
                game.push_event(BallEvent::GoalReached {
                    polygon,
                    ticks: game.time_ticks,
                });
                log::info!(
                    "Level '{}' complete in {} ticks ({} resets)",
                    game.level.name,
                    game.time_ticks,
                    game.resets
                );
                return;
            }
        }

        let bounds = game.level.bounds();
        bounce_in_bounds(
            &mut game.ball.pos,
            &mut game.ball.vel,
            game.ball.radius,
            &bounds,
            game.tuning.wall_restitution,
        );
    }
}

/// Push the ball out of walls; stop at the first barrier or goal
fn resolve_contacts(game: &mut BallGame) -> Contact {
    let restitution = game.tuning.polygon_restitution;

    for index in 0..game.level.polygons.len() {
        let polygon = &game.level.polygons[index];
        match polygon.kind {
            PolygonKind::Goal => {
                if polygon.contains(game.ball.pos) {
                    return Contact::Goal(index);
                }
            }
            PolygonKind::Barrier => {
                if ball_polygon_collision(game.ball.pos, game.ball.radius, &polygon.points).hit {
                    return Contact::Barrier(index);
                }
            }
            PolygonKind::Wall => {
                let hit = ball_polygon_collision(game.ball.pos, game.ball.radius, &polygon.points);
                if !hit.hit {
                    continue;
                }
                let impact = -game.ball.vel.dot(hit.normal);
                resolve_collision(&mut game.ball.pos, &mut game.ball.vel, &hit, restitution);
                if impact > BOUNCE_EVENT_SPEED {
                    game.push_event(BallEvent::Bounced {
                        polygon: index,
                        speed: impact,
                    });
                }
            }
        }
    }

    Contact::Clear
}
