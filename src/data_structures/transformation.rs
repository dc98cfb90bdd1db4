//! Per-instance transformation data for GPU rendering.
//!
//! A [`Transformation`] is the CPU-side position/rotation/scale record of one
//! instance. [`InstanceRaw`] is what actually lands in the per-instance vertex
//! buffer so one draw call can render many transformed copies of a mesh.

use cgmath::{InnerSpace, Matrix3, Matrix4, Rad, SquareMatrix, Vector3, Vector4};

use crate::data_structures::vertex::Vertex;

/// Position, rotation and scale of one instance.
///
/// `rotation` is an axis-angle pair packed into four components: `xyz` is the
/// rotation axis (normalized on use) and `w` the angle in radians. A zero axis
/// or zero angle means no rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub position: Vector3<f32>,
    pub rotation: Vector4<f32>,
    pub scale: Vector3<f32>,
}

impl Transformation {
    pub fn new(position: Vector3<f32>, rotation: Vector4<f32>, scale: Vector3<f32>) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Axis-angle value encoding "no rotation".
    pub fn identity_rotation() -> Vector4<f32> {
        Vector4::new(0.0, 1.0, 0.0, 0.0)
    }

    pub fn from_position_rotation(position: Vector3<f32>, rotation: Vector4<f32>) -> Self {
        Self {
            position,
            rotation,
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }

    pub fn from_position(position: Vector3<f32>) -> Self {
        Self::from_position_rotation(position, Self::identity_rotation())
    }

    /// Position plus a rotation of `angle` radians around (`xrot`, `yrot`, `zrot`).
    pub fn from_components(
        xpos: f32,
        ypos: f32,
        zpos: f32,
        angle: f32,
        xrot: f32,
        yrot: f32,
        zrot: f32,
    ) -> Self {
        Self::from_position_rotation(
            Vector3::new(xpos, ypos, zpos),
            Vector4::new(xrot, yrot, zrot, angle),
        )
    }

    pub fn axis(&self) -> Vector3<f32> {
        self.rotation.truncate()
    }

    pub fn angle(&self) -> Rad<f32> {
        Rad(self.rotation.w)
    }

    fn normalized_axis(&self) -> Option<Vector3<f32>> {
        let axis = self.axis();
        if axis.magnitude2() <= f32::EPSILON * f32::EPSILON || self.rotation.w == 0.0 {
            return None;
        }
        Some(axis.normalize())
    }

    pub fn rotation_matrix(&self) -> Matrix4<f32> {
        match self.normalized_axis() {
            Some(axis) => Matrix4::from_axis_angle(axis, self.angle()),
            None => Matrix4::identity(),
        }
    }

    /// translate(position) * rotate(rotation) * scale(scale)
    pub fn get_transformation_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * self.rotation_matrix()
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    pub fn to_raw(&self) -> InstanceRaw {
        let world_matrix = self.get_transformation_matrix();
        let normal = match self.normalized_axis() {
            Some(axis) => Matrix3::from_axis_angle(axis, self.angle()),
            None => Matrix3::identity(),
        };
        InstanceRaw {
            model: world_matrix.into(),
            normal: normal.into(),
            handedness: world_matrix.determinant().signum(),
        }
    }
}

impl From<Vector3<f32>> for Transformation {
    fn from(position: Vector3<f32>) -> Self {
        Self::from_position(position)
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::from_position(Vector3::new(0.0, 0.0, 0.0))
    }
}

/**
 * The raw instance is the actual data stored on the GPU
 */
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    model: [[f32; 4]; 4],
    normal: [[f32; 3]; 3],
    handedness: f32,
}

impl InstanceRaw {
    pub fn model(&self) -> Matrix4<f32> {
        self.model.into()
    }
}

/**
 * Stride layout here: the model matrix as four vec4 columns, the normal matrix
 * as three vec3 columns and the handedness sign of the model matrix.
 */
impl Vertex for InstanceRaw {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            // Advance once per instance instead of once per vertex
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 4,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 25]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32,
                },
            ],
        }
    }
}
