//! Renderer-agnostic draw commands
//!
//! Scenes are described as an ordered list of primitives. A canvas host can
//! replay them directly; GPU hosts tessellate them into vertices.

use glam::Vec2;

use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Style {
    Fill,
    /// Outline with the given line width
    Stroke(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// One drawing primitive, in arena coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Clear {
        color: [f32; 4],
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: [f32; 4],
        style: Style,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: [f32; 4],
    },
    Polygon {
        points: Vec<Vec2>,
        color: [f32; 4],
        style: Style,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: [f32; 4],
        align: TextAlign,
    },
}

/// Ordered draw commands for one frame
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self, color: [f32; 4]) {
        self.commands.push(DrawCmd::Clear { color });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], style: Style) {
        self.commands.push(DrawCmd::Circle {
            center,
            radius,
            color,
            style,
        });
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.commands.push(DrawCmd::Line {
            from,
            to,
            width,
            color,
        });
    }

    pub fn polygon(&mut self, points: &[Vec2], color: [f32; 4], style: Style) {
        self.commands.push(DrawCmd::Polygon {
            points: points.to_vec(),
            color,
            style,
        });
    }

    pub fn rect(&mut self, rect: Rect, color: [f32; 4], style: Style) {
        let (min, max) = (rect.min(), rect.max());
        self.polygon(
            &[min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)],
            color,
            style,
        );
    }

    pub fn text(&mut self, pos: Vec2, text: impl Into<String>, size: f32, color: [f32; 4], align: TextAlign) {
        self.commands.push(DrawCmd::Text {
            pos,
            text: text.into(),
            size,
            color,
            align,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }
}

/// Same color with its alpha scaled
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}
