//! Planar geometry helpers shared by both games
//!
//! Screen coordinates: origin top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centered on `center`
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Vec2 {
        (self.min() + self.max()) * 0.5
    }

    /// Inclusive containment test
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }

    /// True when `other` lies entirely inside this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains(other.min()) && self.contains(other.max())
    }

    /// Clamp a point into the rectangle shrunk by `inset` on every side.
    ///
    /// An inset larger than half the rectangle collapses that axis to its center.
    pub fn clamp_point(&self, p: Vec2, inset: f32) -> Vec2 {
        let center = self.center();
        let lo = (self.min() + Vec2::splat(inset)).min(center);
        let hi = (self.max() - Vec2::splat(inset)).max(center);
        p.clamp(lo, hi)
    }
}

/// Closest point to `p` on the segment `a`-`b`
pub fn closest_point_on_segment(p: Vec2, a: Vec2, b: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= 1e-12 {
        return a;
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    a + ab * t
}

/// Whether a circle strictly overlaps the segment `a`-`b`
pub fn segment_circle_overlap(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let closest = closest_point_on_segment(center, a, b);
    closest.distance_squared(center) < radius * radius
}

/// Shoelace signed area. Positive for clockwise winding on screen (y down).
pub fn signed_area(points: &[Vec2]) -> f32 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        sum += a.perp_dot(b);
    }
    sum * 0.5
}

/// Area centroid; falls back to the vertex average for degenerate polygons
pub fn centroid(points: &[Vec2]) -> Vec2 {
    if points.is_empty() {
        return Vec2::ZERO;
    }
    let area = signed_area(points);
    if area.abs() < 1e-6 {
        return points.iter().copied().sum::<Vec2>() / points.len() as f32;
    }
    let mut acc = Vec2::ZERO;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        acc += (*a + b) * a.perp_dot(b);
    }
    acc / (6.0 * area)
}

/// Convex check accepting either winding.
///
/// Collinear vertices are tolerated; zero-area polygons are not convex.
/// Every turn must share one sign and the turns must add up to exactly one
/// revolution, which rules out stars and other self-intersecting outlines.
pub fn is_convex(points: &[Vec2]) -> bool {
    let n = points.len();
    if n < 3 || signed_area(points).abs() < 1e-6 {
        return false;
    }

    // Repeated vertices add no edge
    let edges: Vec<Vec2> = (0..n)
        .map(|i| points[(i + 1) % n] - points[i])
        .filter(|e| e.length_squared() > 1e-12)
        .collect();
    if edges.len() < 3 {
        return false;
    }

    let mut sign = 0.0_f32;
    let mut turning = 0.0_f32;
    for (i, &e1) in edges.iter().enumerate() {
        let e2 = edges[(i + 1) % edges.len()];
        let cross = e1.perp_dot(e2);
        let dot = e1.dot(e2);
        if cross.abs() < 1e-6 {
            // Straight on is fine, doubling back is not
            if dot < 0.0 {
                return false;
            }
            continue;
        }
        if sign == 0.0 {
            sign = cross.signum();
        } else if cross.signum() != sign {
            return false;
        }
        turning += cross.atan2(dot);
    }
    (turning.abs() - TAU).abs() < 1e-3
}

/// Point-in-convex-polygon test (boundary counts as inside)
pub fn contains_point_convex(points: &[Vec2], p: Vec2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let winding = signed_area(points).signum();
    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if (b - a).perp_dot(p - a) * winding < 0.0 {
            return false;
        }
    }
    true
}

/// Vertices of a regular polygon, clockwise on screen
pub fn regular_polygon(center: Vec2, radius: f32, sides: usize, rotation: f32) -> Vec<Vec2> {
    let sides = sides.max(3);
    (0..sides)
        .map(|i| {
            let theta = rotation + i as f32 / sides as f32 * TAU;
            center + Vec2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}
