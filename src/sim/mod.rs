//! Shared simulation building blocks
//!
//! Both games build on these. Everything here must stay pure:
//! - Per-frame units only (velocities are pixels per frame)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod geometry;

pub use clock::FrameClock;
pub use collision::{
    CollisionResult, ball_polygon_collision, bounce_in_bounds, circle_circle_collision, reflect_velocity,
    resolve_collision,
};
pub use geometry::{
    Rect, centroid, closest_point_on_segment, contains_point_convex, is_convex, regular_polygon,
    segment_circle_overlap, signed_area,
};
