//! Ball-in-polygon puzzle
//!
//! Guide a bouncing ball into the goal by pulling it with a caged effector.
//! Levels are convex polygons described in JSON and built with the editor.

pub mod editor;
pub mod level;
pub mod state;
pub mod tick;

pub use editor::{Editor, HANDLE_RADIUS, Pick};
pub use level::{Level, LevelError, Polygon, PolygonKind};
pub use state::{Ball, BallEvent, BallGame, BallPhase, Effector};
pub use tick::{BallInput, tick};
