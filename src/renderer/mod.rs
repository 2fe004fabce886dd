//! Draw output
//!
//! Game state becomes a [`DrawList`] of primitives. Canvas hosts replay the
//! list; GPU hosts call [`tessellate`] for a triangle list of [`Vertex`].

pub mod draw;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use draw::{DrawCmd, DrawList, Style, TextAlign};
pub use scene::{ball_scene, editor_scene, rocket_scene};
pub use shapes::tessellate;
pub use vertex::{Vertex, colors};
