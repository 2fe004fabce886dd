//! Shape generation for 2D primitives
//!
//! Everything is emitted as a plain triangle list.

use glam::Vec2;
use std::f32::consts::PI;

use super::draw::{DrawCmd, DrawList, Style};
use super::vertex::Vertex;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a ring (hollow circle)
pub fn ring(center: Vec2, inner_radius: f32, outer_radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let segments = segments.max(3);
    let inner_radius = inner_radius.max(0.0);
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;
        let (dir1, dir2) = (Vec2::from_angle(theta1), Vec2::from_angle(theta2));

        quad(
            &mut vertices,
            [
                center + dir1 * inner_radius,
                center + dir1 * outer_radius,
                center + dir2 * outer_radius,
                center + dir2 * inner_radius,
            ],
            color,
        );
    }

    vertices
}

/// Thick line as a quad; zero-length lines produce nothing
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let side = dir.perp() * (width * 0.5);
    let mut vertices = Vec::with_capacity(6);
    quad(&mut vertices, [from + side, to + side, to - side, from - side], color);
    vertices
}

/// Filled convex polygon as a fan from the first vertex
pub fn polygon_fill(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let origin = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(origin.x, origin.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Closed outline, one line quad per edge
pub fn polygon_outline(points: &[Vec2], width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let n = points.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n)
        .flat_map(|i| line(points[i], points[(i + 1) % n], width, color))
        .collect()
}

fn quad(vertices: &mut Vec<Vertex>, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners;
    for p in [a, b, c, a, c, d] {
        vertices.push(Vertex::new(p.x, p.y, color));
    }
}

/// Triangulate a draw list. Text and clears are left to the host.
pub fn tessellate(list: &DrawList, circle_segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    for cmd in list.iter() {
        match cmd {
            DrawCmd::Clear { .. } | DrawCmd::Text { .. } => {}
            DrawCmd::Circle {
                center,
                radius,
                color,
                style,
            } => match *style {
                Style::Fill => vertices.extend(circle(*center, *radius, *color, circle_segments)),
                Style::Stroke(width) => vertices.extend(ring(
                    *center,
                    radius - width * 0.5,
                    radius + width * 0.5,
                    *color,
                    circle_segments,
                )),
            },
            DrawCmd::Line {
                from,
                to,
                width,
                color,
            } => vertices.extend(line(*from, *to, *width, *color)),
            DrawCmd::Polygon { points, color, style } => match *style {
                Style::Fill => vertices.extend(polygon_fill(points, *color)),
                Style::Stroke(width) => vertices.extend(polygon_outline(points, width, *color)),
            },
        }
    }
    vertices
}
