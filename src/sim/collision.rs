//! Collision detection and response
//!
//! Balls are circles; obstacles are convex polygons and the arena bounds.
//! Response is reflect-and-dampen: push the ball out along the contact
//! normal, then flip the normal velocity component scaled by restitution.

use glam::Vec2;

use super::geometry::{Rect, closest_point_on_segment, contains_point_convex};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Contact point on the obstacle surface (if hit)
    pub point: Vec2,
    /// Surface normal at contact (pointing toward ball center, for reflection)
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Check collision between a ball and a convex polygon
///
/// Finds the closest point over all edges. A ball whose center lies inside
/// the polygon (tunneling) is pushed out through the nearest edge.
pub fn ball_polygon_collision(ball_pos: Vec2, ball_radius: f32, polygon: &[Vec2]) -> CollisionResult {
    let n = polygon.len();
    if n < 2 {
        return CollisionResult::miss();
    }

    let mut closest = polygon[0];
    let mut best_dist_sq = f32::MAX;
    let mut best_edge = (polygon[0], polygon[1 % n]);
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let candidate = closest_point_on_segment(ball_pos, a, b);
        let dist_sq = candidate.distance_squared(ball_pos);
        if dist_sq < best_dist_sq {
            best_dist_sq = dist_sq;
            closest = candidate;
            best_edge = (a, b);
        }
    }

    let dist = best_dist_sq.sqrt();
    let inside = n >= 3 && contains_point_convex(polygon, ball_pos);

    if inside {
        // Outward normal of the nearest edge, oriented away from the centroid
        let (a, b) = best_edge;
        let edge = b - a;
        let mut normal = edge.perp().normalize_or_zero();
        let interior = polygon.iter().copied().sum::<Vec2>() / n as f32;
        if normal.dot(closest - interior) < 0.0 {
            normal = -normal;
        }
        return CollisionResult {
            hit: true,
            point: closest,
            normal,
            penetration: ball_radius + dist,
        };
    }

    if dist < ball_radius {
        let normal = if dist > 1e-6 {
            (ball_pos - closest) / dist
        } else {
            // Center exactly on the boundary
            let (a, b) = best_edge;
            (b - a).perp().normalize_or_zero()
        };
        return CollisionResult {
            hit: true,
            point: closest,
            normal,
            penetration: ball_radius - dist,
        };
    }

    CollisionResult::miss()
}

/// Check collision between two circles; the normal points toward `a`
pub fn circle_circle_collision(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> CollisionResult {
    let delta = a_pos - b_pos;
    let dist = delta.length();
    let reach = a_radius + b_radius;
    if dist >= reach {
        return CollisionResult::miss();
    }
    let normal = if dist > 1e-6 { delta / dist } else { Vec2::NEG_Y };
    CollisionResult {
        hit: true,
        point: b_pos + normal * b_radius,
        normal,
        penetration: reach - dist,
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Apply reflect-and-dampen response for a hit
///
/// Only the normal component is damped: v' = v - (1 + e)(v·n)n.
/// A ball already separating keeps its velocity.
pub fn resolve_collision(pos: &mut Vec2, vel: &mut Vec2, hit: &CollisionResult, restitution: f32) {
    if !hit.hit {
        return;
    }
    *pos += hit.normal * hit.penetration;
    let vn = vel.dot(hit.normal);
    if vn < 0.0 {
        *vel -= (1.0 + restitution) * vn * hit.normal;
    }
}

/// Reflect against axis-aligned bounds with restitution
///
/// Clamps the ball back inside and flips the offending velocity axis.
/// Returns true if any wall was touched.
pub fn bounce_in_bounds(pos: &mut Vec2, vel: &mut Vec2, radius: f32, bounds: &Rect, restitution: f32) -> bool {
    let left = bounds.x + radius;
    let right = bounds.x + bounds.width - radius;
    let top = bounds.y + radius;
    let bottom = bounds.y + bounds.height - radius;

    let mut touched = false;

    if pos.x > right {
        vel.x *= -restitution;
        pos.x = right;
        touched = true;
    } else if pos.x < left {
        vel.x *= -restitution;
        pos.x = left;
        touched = true;
    }

    if pos.y > bottom {
        vel.y *= -restitution;
        pos.y = bottom;
        touched = true;
    } else if pos.y < top {
        vel.y *= -restitution;
        pos.y = top;
        touched = true;
    }

    touched
}
