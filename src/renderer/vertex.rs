//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// 2D vertex with position and color, laid out for direct GPU upload
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    /// Byte stride between vertices
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
    /// Byte offset of `color` within a vertex
    pub const COLOR_OFFSET: usize = std::mem::size_of::<[f32; 2]>();

    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Raw bytes of a vertex slice, ready for a vertex buffer
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.7];

    pub const ROCKET: [f32; 4] = WHITE;
    pub const TARGET: [f32; 4] = [0.4, 0.6, 1.0, 1.0];

    pub const BALL: [f32; 4] = [0.2, 0.5, 1.0, 1.0];
    pub const EFFECTOR: [f32; 4] = [0.2, 0.8, 0.4, 1.0];
    pub const CAGE: [f32; 4] = [0.2, 0.8, 0.4, 0.5];
    pub const TETHER: [f32; 4] = [1.0, 1.0, 1.0, 0.6];
    pub const WALL: [f32; 4] = [0.7, 0.7, 0.8, 1.0];
    pub const GOAL: [f32; 4] = [0.3, 0.9, 0.4, 0.35];
    pub const BARRIER: [f32; 4] = [1.0, 0.25, 0.2, 0.8];
    pub const HANDLE: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const SELECTED: [f32; 4] = [0.9, 0.85, 0.3, 1.0];
}
