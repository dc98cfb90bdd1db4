//! A group of meshes loaded from one asset that is drawn as a unit.

use std::ops::Range;

use crate::{
    data_structures::{bounding_box::BoundingBox, mesh::Mesh, vertex::VertexDescriptor},
    resources,
};

/// The meshes of one model file plus their combined bounds.
///
/// Combined streams concatenate the sub-meshes in order; indices are rebased
/// so they address the combined vertex stream directly.
#[derive(Clone, Debug, Default)]
pub struct ModelMeshGroup {
    meshes: Vec<Mesh>,
    bounding_box: BoundingBox,
    path: String,
}

impl ModelMeshGroup {
    /// Loads all meshes of the OBJ file at `path`.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let meshes = resources::load_model_obj(path)?;
        Ok(Self::from_meshes(path, meshes))
    }

    pub fn from_meshes(path: &str, meshes: Vec<Mesh>) -> Self {
        let bounding_box = meshes
            .iter()
            .map(|mesh| *mesh.bounding_box())
            .reduce(|acc, bounds| acc.union(&bounds))
            .unwrap_or_default();
        Self {
            meshes,
            bounding_box,
            path: path.to_string(),
        }
    }

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn vertex_count(&self) -> usize {
        self.meshes.iter().map(Mesh::vertex_count).sum()
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    pub fn all_vertices(&self) -> Vec<VertexDescriptor> {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().copied())
            .collect()
    }

    pub fn all_indexes(&self) -> Vec<u32> {
        let mut base = 0;
        let mut indexes = Vec::with_capacity(self.triangle_count() * 3);
        for mesh in &self.meshes {
            indexes.extend(mesh.element_index().iter().map(|index| index + base));
            base += mesh.vertex_count() as u32;
        }
        indexes
    }

    /// Range of each sub-mesh inside [`all_indexes`](Self::all_indexes).
    pub fn index_ranges(&self) -> Vec<Range<u32>> {
        let mut start = 0;
        self.meshes
            .iter()
            .map(|mesh| {
                let end = start + mesh.element_index().len() as u32;
                let range = start..end;
                start = end;
                range
            })
            .collect()
    }

    /// Draws `instances` copies of every sub-mesh out of the combined buffers,
    /// which the caller must already have bound.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, instances: u32) {
        for (mesh, range) in self.meshes.iter().zip(self.index_ranges()) {
            mesh.bind_textures(render_pass);
            render_pass.draw_indexed(range, 0, 0..instances);
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    fn group() -> ModelMeshGroup {
        let cube = Mesh::gen_cube();
        let plane = Mesh::gen_plane(4.0, 4.0, 1.0, Vector3::new(0.0, -2.0, 0.0));
        ModelMeshGroup::from_meshes("memory", vec![cube, plane])
    }

    #[test]
    fn combined_streams_are_rebased() {
        let group = group();
        assert_eq!(group.vertex_count(), 27 + 4);
        assert_eq!(group.triangle_count(), 12 + 2);
        let indexes = group.all_indexes();
        assert_eq!(indexes.len(), 42);
        assert_eq!(&indexes[36..], &[27, 28, 29, 29, 28, 30]);
        assert!(indexes.iter().all(|&i| (i as usize) < group.all_vertices().len()));
    }

    #[test]
    fn index_ranges_partition_the_stream() {
        assert_eq!(group().index_ranges(), vec![0..36, 36..42]);
    }

    #[test]
    fn bounds_cover_all_meshes() {
        let group = group();
        assert_eq!(group.bounding_box().min, Vector3::new(-2.0, -2.0, -2.0));
        assert_eq!(group.bounding_box().max, Vector3::new(2.0, 0.5, 2.0));
    }

    #[test]
    fn empty_group_has_degenerate_bounds() {
        let group = ModelMeshGroup::from_meshes("empty", Vec::new());
        assert_eq!(group.bounding_box(), &BoundingBox::default());
        assert!(group.all_indexes().is_empty());
    }
}
