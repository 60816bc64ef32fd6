//! Vertex types and the fixed palette

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Fixed colors. The palette stays under full brightness - nothing on a
/// PS1 ever got to pure white.
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    /// Grid and jitter lines (30, 30, 30)
    pub const DARK_GRAY: [f32; 4] = [0.118, 0.118, 0.118, 1.0];
    /// Paddle body and ball highlight (180, 180, 180)
    pub const LIGHT_GRAY: [f32; 4] = [0.706, 0.706, 0.706, 1.0];
    /// Ball and paddle highlight edge (200, 200, 200)
    pub const WHITE: [f32; 4] = [0.784, 0.784, 0.784, 1.0];
}

/// Convert a 0-255 base color to a vertex color
pub fn from_rgb8(rgb: [u8; 3]) -> [f32; 4] {
    [
        rgb[0] as f32 / 255.0,
        rgb[1] as f32 / 255.0,
        rgb[2] as f32 / 255.0,
        1.0,
    ]
}

/// Brightness-offset variant of a base color, clamped to display range.
/// Positive offsets make the lit facet, negative the shadowed one.
pub fn shaded(rgb: [u8; 3], offset: i16) -> [f32; 4] {
    let shift = |c: u8| (c as i16 + offset).clamp(0, 255) as f32 / 255.0;
    [shift(rgb[0]), shift(rgb[1]), shift(rgb[2]), 1.0]
}
