//! CPU-side mesh data and its GPU upload lifecycle.
//!
//! A [`Mesh`] owns an ordered vertex array and a triangle-list index array.
//! Vertex and triangle counts are always derived from those arrays. The
//! procedural generators live in [`crate::geometry`], OBJ export in
//! [`crate::resources::obj`].

use std::{collections::HashMap, ops::Range, sync::Arc};

use wgpu::util::DeviceExt;

use crate::{
    data_structures::{bounding_box::BoundingBox, texture::Texture, vertex::VertexDescriptor},
    error::MeshError,
};

/// Vertex and index buffers created by [`Mesh::upload`].
#[derive(Clone, Debug)]
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub(crate) vertices: Vec<VertexDescriptor>,
    pub(crate) element_index: Vec<u32>,
    bounding_box: BoundingBox,
    textures: HashMap<u32, Arc<Texture>>,
    buffers: Option<MeshBuffers>,
}

impl Mesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a mesh from finished arrays and computes its bounding box.
    pub fn from_parts(vertices: Vec<VertexDescriptor>, element_index: Vec<u32>) -> Self {
        let mut mesh = Self {
            vertices,
            element_index,
            ..Default::default()
        };
        mesh.compute_bounding_box();
        mesh
    }

    pub fn vertices(&self) -> &[VertexDescriptor] {
        &self.vertices
    }

    pub fn element_index(&self) -> &[u32] {
        &self.element_index
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.element_index.len() / 3
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Recomputes the bounding box from the current vertices.
    pub fn compute_bounding_box(&mut self) {
        self.bounding_box.compute(&self.vertices);
    }

    /// Appends vertices. The bounding box is left untouched until
    /// [`compute_bounding_box`](Self::compute_bounding_box) is called.
    pub fn add_vertices(&mut self, vertices: &[VertexDescriptor]) {
        self.vertices.extend_from_slice(vertices);
    }

    pub fn add_element_indexes(&mut self, indexes: &[u32]) {
        self.element_index.extend_from_slice(indexes);
    }

    /// Checks the triangle-list invariants: whole triangles only and every
    /// index inside the vertex array.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.element_index.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle(self.element_index.len()));
        }
        match self
            .element_index
            .iter()
            .find(|&&index| index as usize >= self.vertices.len())
        {
            Some(&index) => Err(MeshError::IndexOutOfBounds {
                index,
                vertex_count: self.vertices.len(),
            }),
            None => Ok(()),
        }
    }

    /// Registers `texture` for bind group slot `unit`, replacing a previous one.
    pub fn attach_texture(&mut self, texture: Arc<Texture>, unit: u32) {
        self.textures.insert(unit, texture);
    }

    pub fn textures(&self) -> &HashMap<u32, Arc<Texture>> {
        &self.textures
    }

    pub fn bind_textures(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        for (unit, texture) in &self.textures {
            texture.bind(render_pass, *unit);
        }
    }

    /// Creates (or recreates) the GPU buffers holding this mesh.
    pub fn upload(&mut self, device: &wgpu::Device, label: &str) {
        log::debug!(
            "Uploading {label}: {} vertices, {} triangles",
            self.vertex_count(),
            self.triangle_count()
        );
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", label)),
            contents: bytemuck::cast_slice(&self.element_index),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });
        self.buffers = Some(MeshBuffers {
            vertex_buffer,
            index_buffer,
            num_elements: self.element_index.len() as u32,
        });
    }

    pub fn buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.as_ref()
    }

    /// Binds textures and buffers and draws `instances`. The per-instance
    /// buffer (slot 1) must already be set by the caller.
    pub fn draw_instanced(&self, render_pass: &mut wgpu::RenderPass<'_>, instances: Range<u32>) {
        let Some(buffers) = &self.buffers else {
            log::warn!("Skipping draw of a mesh that was never uploaded");
            return;
        };
        self.bind_textures(render_pass);
        render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        render_pass.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..buffers.num_elements, 0, instances);
    }
}
