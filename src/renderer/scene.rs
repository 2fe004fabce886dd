//! Build draw lists from game state

use glam::Vec2;

use super::draw::{DrawList, Style, TextAlign, with_alpha};
use super::vertex::colors;
use crate::ball::{BallGame, BallPhase, Editor, HANDLE_RADIUS, Level, PolygonKind};
use crate::rocket::{GamePhase, RocketGame};
use crate::settings::Settings;
use crate::sim::Rect;

const HUD_SIZE: f32 = 24.0;

/// One frame of the rocket game
pub fn rocket_scene(game: &RocketGame) -> DrawList {
    let mut list = DrawList::new();
    list.clear(colors::BACKGROUND);

    for particle in &game.particles {
        let tail = particle.pos - Vec2::from_angle(particle.angle()) * particle.length;
        list.line(particle.pos, tail, 2.0, particle.rgba());
    }

    for explosion in &game.explosions {
        list.circle(explosion.pos, explosion.radius, explosion.rgba(), Style::Fill);
    }

    for target in &game.targets {
        list.circle(target.pos, target.radius, colors::TARGET, Style::Stroke(2.0));
    }

    let rocket = &game.rocket;
    list.line(rocket.pos, rocket.tip(), rocket.width, colors::ROCKET);

    for bonus in &game.bonus_texts {
        list.text(
            bonus.pos,
            bonus.text.clone(),
            20.0,
            with_alpha(colors::WHITE, bonus.opacity()),
            TextAlign::Center,
        );
    }

    list.text(
        Vec2::new(20.0, 40.0),
        format!("Score: {}", game.score),
        HUD_SIZE,
        colors::WHITE,
        TextAlign::Left,
    );

    if game.phase == GamePhase::GameOver {
        let (w, h) = (game.tuning.width, game.tuning.height);
        list.rect(Rect::new(0.0, 0.0, w, h), colors::OVERLAY, Style::Fill);
        let center = Vec2::new(w / 2.0, h / 2.0);
        list.text(center - Vec2::new(0.0, 50.0), "Game Over", 48.0, colors::WHITE, TextAlign::Center);
        list.text(
            center + Vec2::new(0.0, 10.0),
            format!("Score: {}", game.score),
            36.0,
            colors::WHITE,
            TextAlign::Center,
        );
        list.text(
            center + Vec2::new(0.0, 60.0),
            "Press Space to Play Again",
            HUD_SIZE,
            colors::WHITE,
            TextAlign::Center,
        );
    }

    list
}

fn polygon_color(kind: PolygonKind) -> ([f32; 4], Style) {
    match kind {
        PolygonKind::Wall => (colors::WALL, Style::Stroke(2.0)),
        PolygonKind::Goal => (colors::GOAL, Style::Fill),
        PolygonKind::Barrier => (colors::BARRIER, Style::Fill),
    }
}

fn level_layer(list: &mut DrawList, level: &Level) {
    for polygon in &level.polygons {
        let (color, style) = polygon_color(polygon.kind);
        list.polygon(&polygon.points, color, style);
    }
    list.rect(level.cage, colors::CAGE, Style::Stroke(1.0));
}

/// One frame of the ball puzzle
pub fn ball_scene(game: &BallGame, settings: &Settings) -> DrawList {
    let mut list = DrawList::new();
    list.clear(colors::BACKGROUND);
    level_layer(&mut list, &game.level);

    if game.effector.engaged && settings.show_tether {
        if let Some((from, to)) = game.tether() {
            list.line(from, to, 1.0, colors::TETHER);
        }
    }

    list.circle(game.ball.pos, game.ball.radius, colors::BALL, Style::Stroke(2.0));
    let effector_style = if game.effector.engaged {
        Style::Fill
    } else {
        Style::Stroke(2.0)
    };
    list.circle(game.effector.pos, game.effector.radius, colors::EFFECTOR, effector_style);

    if game.phase == BallPhase::Won {
        let center = game.level.bounds().center();
        list.text(center, "Level Complete!", 48.0, colors::WHITE, TextAlign::Center);
    }

    list
}

/// Editor view: level, ball start, vertex handles and selection
pub fn editor_scene(editor: &Editor, ball_radius: f32) -> DrawList {
    let mut list = DrawList::new();
    list.clear(colors::BACKGROUND);
    level_layer(&mut list, &editor.level);

    list.circle(editor.level.ball_start, ball_radius, colors::BALL, Style::Stroke(1.0));

    for (index, polygon) in editor.level.polygons.iter().enumerate() {
        let selected = editor.selected == Some(index);
        if selected {
            list.polygon(&polygon.points, colors::SELECTED, Style::Stroke(3.0));
        }
        let handle = if selected { colors::SELECTED } else { colors::HANDLE };
        for &vertex in &polygon.points {
            list.circle(vertex, HANDLE_RADIUS / 2.0, handle, Style::Fill);
        }
    }

    list.text(
        Vec2::new(20.0, 40.0),
        editor.level.name.clone(),
        HUD_SIZE,
        colors::WHITE,
        TextAlign::Left,
    );

    list
}
