//! Level descriptions for the ball puzzle
//!
//! A level is plain JSON: arena size, ball start, the effector cage and a
//! list of convex polygons. Points serialize as `[x, y]` arrays.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{GAME_HEIGHT, GAME_WIDTH};
use crate::sim::{Rect, centroid, contains_point_convex, is_convex, regular_polygon};
use crate::tuning::default_cage;

/// Errors from loading, parsing or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("arena size must be positive, got {width}x{height}")]
    EmptyArena { width: f32, height: f32 },
    #[error("polygon {index} has {count} points, need at least 3")]
    TooFewPoints { index: usize, count: usize },
    #[error("polygon {index} is not convex")]
    NotConvex { index: usize },
    #[error("ball start {0} is outside the arena")]
    BallOutside(Vec2),
    #[error("effector cage is outside the arena")]
    CageOutside,
}

/// What a polygon does to the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonKind {
    /// Solid obstacle, the ball bounces off
    #[default]
    Wall,
    /// Level is won once the ball center is inside
    Goal,
    /// Hazard, touching it sends the ball back to the start
    Barrier,
}

/// A convex polygon in arena coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    #[serde(default)]
    pub kind: PolygonKind,
    pub points: Vec<Vec2>,
}

impl Polygon {
    pub fn new(kind: PolygonKind, points: Vec<Vec2>) -> Self {
        Self { kind, points }
    }

    /// Regular n-gon
    pub fn regular(kind: PolygonKind, center: Vec2, radius: f32, sides: usize) -> Self {
        Self::new(kind, regular_polygon(center, radius, sides, 0.0))
    }

    /// Axis-aligned box
    pub fn rect(kind: PolygonKind, rect: Rect) -> Self {
        let (min, max) = (rect.min(), rect.max());
        Self::new(
            kind,
            vec![min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
        )
    }

    pub fn centroid(&self) -> Vec2 {
        centroid(&self.points)
    }

    pub fn contains(&self, p: Vec2) -> bool {
        contains_point_convex(&self.points, p)
    }

    pub fn is_convex(&self) -> bool {
        is_convex(&self.points)
    }

    pub fn translate(&mut self, delta: Vec2) {
        for p in &mut self.points {
            *p += delta;
        }
    }
}

/// A complete puzzle level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Level {
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub ball_start: Vec2,
    /// Region the effector is confined to
    pub cage: Rect,
    pub polygons: Vec<Polygon>,
}

impl Default for Level {
    /// Open arena with just the effector cage
    fn default() -> Self {
        Self {
            name: "Open Arena".to_string(),
            width: GAME_WIDTH,
            height: GAME_HEIGHT,
            ball_start: Vec2::new(100.0, GAME_HEIGHT - 100.0),
            cage: default_cage(GAME_WIDTH, GAME_HEIGHT),
            polygons: Vec::new(),
        }
    }
}

impl Level {
    /// Small built-in puzzle: a ledge, a spike and a goal pocket
    pub fn demo() -> Self {
        let mut level = Self {
            name: "First Steps".to_string(),
            ..Self::default()
        };
        level.polygons = vec![
            Polygon::rect(PolygonKind::Wall, Rect::new(0.0, 430.0, 220.0, 20.0)),
            Polygon::new(
                PolygonKind::Wall,
                vec![
                    Vec2::new(560.0, 520.0),
                    Vec2::new(800.0, 440.0),
                    Vec2::new(800.0, 600.0),
                    Vec2::new(560.0, 600.0),
                ],
            ),
            Polygon::regular(PolygonKind::Barrier, Vec2::new(400.0, 560.0), 30.0, 3),
            Polygon::rect(PolygonKind::Goal, Rect::new(680.0, 60.0, 80.0, 80.0)),
        ];
        level
    }

    /// Arena bounds
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::EmptyArena {
                width: self.width,
                height: self.height,
            });
        }
        for (index, polygon) in self.polygons.iter().enumerate() {
            if polygon.points.len() < 3 {
                return Err(LevelError::TooFewPoints {
                    index,
                    count: polygon.points.len(),
                });
            }
            if !polygon.is_convex() {
                return Err(LevelError::NotConvex { index });
            }
        }
        let bounds = self.bounds();
        if !bounds.contains(self.ball_start) {
            return Err(LevelError::BallOutside(self.ball_start));
        }
        if !bounds.contains_rect(&self.cage) {
            return Err(LevelError::CageOutside);
        }
        Ok(())
    }

    /// Parse and validate a level
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Level = serde_json::from_str(json)?;
        level.validate()?;
        log::info!(
            "Loaded level '{}' ({} polygons)",
            level.name,
            level.polygons.len()
        );
        Ok(level)
    }

    /// Pretty JSON for sharing or saving
    pub fn to_json(&self) -> Result<String, LevelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a level file from disk
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
