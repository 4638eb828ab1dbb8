//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    use crate::sim::BubbleColor;

    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
    pub const PLAYFIELD: [f32; 4] = [0.06, 0.07, 0.12, 1.0];
    pub const DANGER_LINE: [f32; 4] = [0.9, 0.2, 0.2, 0.35];
    pub const AIM_GUIDE: [f32; 4] = [1.0, 1.0, 1.0, 0.45];
    pub const SHOOTER_RING: [f32; 4] = [0.5, 0.5, 0.6, 1.0];
    pub const HIGHLIGHT: [f32; 4] = [1.0, 1.0, 1.0, 0.35];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.6];
    pub const BANNER_CLEARED: [f32; 4] = [0.2, 0.7, 0.35, 0.9];
    pub const BANNER_OVERFLOWED: [f32; 4] = [0.75, 0.15, 0.15, 0.9];

    /// Fill color for a bubble
    pub fn bubble(color: BubbleColor) -> [f32; 4] {
        match color {
            BubbleColor::Red => [0.95, 0.25, 0.25, 1.0],
            BubbleColor::Green => [0.3, 0.85, 0.35, 1.0],
            BubbleColor::Blue => [0.3, 0.5, 1.0, 1.0],
            BubbleColor::Yellow => [1.0, 0.85, 0.25, 1.0],
            BubbleColor::Purple => [0.7, 0.35, 0.95, 1.0],
            BubbleColor::Cyan => [0.25, 0.9, 0.95, 1.0],
        }
    }
}
