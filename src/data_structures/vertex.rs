//! Per-vertex attribute record and GPU vertex layouts.

/// Anything that is stored in a vertex buffer describes its own layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// Position, normal and texture coordinate of a single vertex.
///
/// The struct is `#[repr(C)]` and `Pod` so a `&[VertexDescriptor]` can be cast
/// straight into buffer contents.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexDescriptor {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub texcoord: [f32; 2],
}

impl VertexDescriptor {
    pub fn new(position: [f32; 3], normal: [f32; 3], texcoord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            texcoord,
        }
    }

    pub fn position(&self) -> cgmath::Vector3<f32> {
        self.position.into()
    }

    pub fn normal(&self) -> cgmath::Vector3<f32> {
        self.normal.into()
    }
}

/**
 * Stride layout: position (vec3) + normal (vec3) + texcoord (vec2).
 *
 * Locations 0..=2 are reserved for the vertex stream, the per-instance stream
 * (see `InstanceRaw`) starts right after.
 */
impl Vertex for VertexDescriptor {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<VertexDescriptor>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
