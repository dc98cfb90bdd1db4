//! Instanced rendering of one shared model.
//!
//! [`ModelMeshInstanced`] pairs the geometry of a [`ModelMeshGroup`] with a
//! growable list of [`Transformation`]s and renders all of them with a single
//! draw call per sub-mesh.
//!
//! GPU resources are held as `wgpu::Buffer` handles, which are reference
//! counted and independent of where the owning struct lives, so moving a
//! `ModelMeshInstanced` needs no re-registration of its buffers.

use cgmath::{Matrix4, Vector3, Vector4};
use wgpu::util::DeviceExt;

use crate::{
    data_structures::{
        bounding_box::BoundingBox,
        model_mesh_group::ModelMeshGroup,
        transformation::{InstanceRaw, Transformation},
    },
    error::MeshError,
};

/// Buffers bound by [`ModelMeshInstanced::draw`].
#[derive(Clone, Debug)]
pub struct InstancedBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    /// Shared per-instance buffer, owned jointly with whoever passed it in.
    pub instance_buffer: wgpu::Buffer,
}

#[derive(Debug)]
pub struct ModelMeshInstanced {
    model_mesh_group: ModelMeshGroup,
    transformations: Vec<Transformation>,
    buffers: Option<InstancedBuffers>,
    model_path: String,
}

impl ModelMeshInstanced {
    /// Loads the model at `model_path` and starts with a copy of `transformations`.
    pub fn new(model_path: &str, transformations: &[Transformation]) -> anyhow::Result<Self> {
        let model_mesh_group = ModelMeshGroup::load(model_path)?;
        Ok(Self::from_group(model_mesh_group, transformations))
    }

    pub fn from_group(model_mesh_group: ModelMeshGroup, transformations: &[Transformation]) -> Self {
        let model_path = model_mesh_group.path().to_string();
        Self {
            model_mesh_group,
            transformations: transformations.to_vec(),
            buffers: None,
            model_path,
        }
    }

    pub fn add_instance(&mut self, transformation: Transformation) {
        self.transformations.push(transformation);
    }

    /// Inserts the whole batch in front of the existing instances, keeping the
    /// batch's own order. Single-instance insertion appends instead.
    pub fn add_instances(&mut self, transformations: &[Transformation]) {
        self.transformations
            .splice(0..0, transformations.iter().copied());
    }

    /// Appends one instance per position/rotation pair. Nothing is inserted
    /// when the slices differ in length.
    pub fn add_instances_with_rotations(
        &mut self,
        positions: &[Vector3<f32>],
        rotations: &[Vector4<f32>],
    ) -> Result<(), MeshError> {
        if positions.len() != rotations.len() {
            return Err(MeshError::MismatchedInstanceData {
                positions: positions.len(),
                rotations: rotations.len(),
            });
        }
        self.transformations.extend(
            positions
                .iter()
                .zip(rotations)
                .map(|(&position, &rotation)| Transformation::from_position_rotation(position, rotation)),
        );
        Ok(())
    }

    /// Appends one unrotated, unscaled instance per position.
    pub fn add_instances_at(&mut self, positions: &[Vector3<f32>]) {
        self.transformations
            .extend(positions.iter().copied().map(Transformation::from_position));
    }

    pub fn add_instance_trs(
        &mut self,
        position: Vector3<f32>,
        rotation: Vector4<f32>,
        scale: Vector3<f32>,
    ) {
        self.add_instance(Transformation::new(position, rotation, scale));
    }

    pub fn add_instance_components(
        &mut self,
        xpos: f32,
        ypos: f32,
        zpos: f32,
        angle: f32,
        xrot: f32,
        yrot: f32,
        zrot: f32,
    ) {
        self.add_instance(Transformation::from_components(
            xpos, ypos, zpos, angle, xrot, yrot, zrot,
        ));
    }

    pub fn remove_instance(&mut self, index: usize) -> Result<Transformation, MeshError> {
        self.check_index(index)?;
        Ok(self.transformations.remove(index))
    }

    fn check_index(&self, index: usize) -> Result<(), MeshError> {
        if index >= self.transformations.len() {
            return Err(MeshError::InstanceOutOfRange {
                index,
                count: self.transformations.len(),
            });
        }
        Ok(())
    }

    pub fn get_transformation(&self, index: usize) -> Result<&Transformation, MeshError> {
        self.transformations
            .get(index)
            .ok_or(MeshError::InstanceOutOfRange {
                index,
                count: self.transformations.len(),
            })
    }

    pub fn get_position(&self, index: usize) -> Result<&Vector3<f32>, MeshError> {
        self.get_transformation(index).map(|t| &t.position)
    }

    pub fn get_rotation(&self, index: usize) -> Result<&Vector4<f32>, MeshError> {
        self.get_transformation(index).map(|t| &t.rotation)
    }

    pub fn get_transformation_matrix(&self, index: usize) -> Result<Matrix4<f32>, MeshError> {
        self.get_transformation(index)
            .map(Transformation::get_transformation_matrix)
    }

    /// Bounds of the shared geometry placed by instance `index`.
    pub fn get_bounding_box(&self, index: usize) -> Result<BoundingBox, MeshError> {
        Ok(self.get_transformation_matrix(index)? * *self.model_mesh_group.bounding_box())
    }

    pub fn get_instance_number(&self) -> usize {
        self.transformations.len()
    }

    pub fn get_transformations(&self) -> &[Transformation] {
        &self.transformations
    }

    pub fn set_transformations(&mut self, transformations: Vec<Transformation>) {
        self.transformations = transformations;
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn model_mesh_group(&self) -> &ModelMeshGroup {
        &self.model_mesh_group
    }

    pub fn buffers(&self) -> Option<&InstancedBuffers> {
        self.buffers.as_ref()
    }

    pub fn instance_data(&self) -> Vec<InstanceRaw> {
        self.transformations.iter().map(Transformation::to_raw).collect()
    }

    /// Uploads the combined geometry and records `instance_buffer` as the
    /// per-instance stream. Calling it again re-uploads the geometry.
    pub fn init_gpu_buffers(&mut self, device: &wgpu::Device, instance_buffer: &wgpu::Buffer) {
        if self.buffers.is_some() {
            log::warn!("GPU buffers of {} were already initialized", self.model_path);
        }
        let vertices = self.model_mesh_group.all_vertices();
        let indexes = self.model_mesh_group.all_indexes();
        log::debug!(
            "Uploading {}: {} vertices, {} indexes",
            self.model_path,
            vertices.len(),
            indexes.len()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Vertex Buffer", self.model_path)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{:?} Index Buffer", self.model_path)),
            contents: bytemuck::cast_slice(&indexes),
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
        });

        self.buffers = Some(InstancedBuffers {
            vertex_buffer,
            index_buffer,
            instance_buffer: instance_buffer.clone(),
        });
    }

    /// Instance records that fit into a buffer holding `capacity` of them.
    /// Records beyond that are dropped with a warning.
    pub fn fitting_instances(&self, capacity: usize) -> Vec<InstanceRaw> {
        let mut raw_instances = self.instance_data();
        if raw_instances.len() > capacity {
            log::warn!(
                "{} instances of {} exceed the instance buffer capacity of {}",
                raw_instances.len(),
                self.model_path,
                capacity
            );
            raw_instances.truncate(capacity);
        }
        raw_instances
    }

    /// Writes the current instance records into the shared instance buffer.
    pub fn write_instances(&self, queue: &wgpu::Queue) {
        let Some(buffers) = &self.buffers else {
            log::warn!("Cannot write instances of {} before its GPU buffers exist", self.model_path);
            return;
        };
        let capacity = buffers.instance_buffer.size() as usize / std::mem::size_of::<InstanceRaw>();
        let fitting = self.fitting_instances(capacity);
        if !fitting.is_empty() {
            queue.write_buffer(&buffers.instance_buffer, 0, bytemuck::cast_slice(&fitting));
        }
    }

    /// Renders `instances` copies of the model. Whether that many records are
    /// present in the instance buffer is up to the caller.
    pub fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>, instances: u32) {
        let Some(buffers) = &self.buffers else {
            log::warn!("Tried to draw {} before initializing its GPU buffers", self.model_path);
            return;
        };
        render_pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        render_pass.set_vertex_buffer(1, buffers.instance_buffer.slice(..));
        render_pass.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.model_mesh_group.draw(render_pass, instances);
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;
    use crate::data_structures::mesh::Mesh;

    fn cubes(transformations: &[Transformation]) -> ModelMeshInstanced {
        let group = ModelMeshGroup::from_meshes("cube", vec![Mesh::gen_cube()]);
        ModelMeshInstanced::from_group(group, transformations)
    }

    fn at(x: f32) -> Transformation {
        Transformation::from_position(Vector3::new(x, 0.0, 0.0))
    }

    #[test]
    fn single_instances_append() {
        let mut model = cubes(&[at(0.0)]);
        model.add_instance(at(1.0));
        model.add_instance_trs(
            Vector3::new(2.0, 0.0, 0.0),
            Transformation::identity_rotation(),
            Vector3::new(1.0, 1.0, 1.0),
        );
        model.add_instance_components(3.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0);
        let xs: Vec<f32> = model.get_transformations().iter().map(|t| t.position.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn batches_are_inserted_in_front() {
        let mut model = cubes(&[at(0.0)]);
        model.add_instances(&[at(1.0), at(2.0)]);
        let xs: Vec<f32> = model.get_transformations().iter().map(|t| t.position.x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 0.0]);
    }

    #[test]
    fn positions_and_rotations_append_pairwise() {
        let mut model = cubes(&[]);
        model
            .add_instances_with_rotations(
                &[Vector3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)],
                &[Vector4::new(0.0, 1.0, 0.0, 0.5), Vector4::new(1.0, 0.0, 0.0, 1.5)],
            )
            .expect("lengths match");
        assert_eq!(model.get_instance_number(), 2);
        assert_eq!(*model.get_rotation(1).expect("in range"), Vector4::new(1.0, 0.0, 0.0, 1.5));
    }

    #[test]
    fn mismatched_lengths_insert_nothing() {
        let mut model = cubes(&[at(0.0)]);
        let result = model.add_instances_with_rotations(
            &[Vector3::new(1.0, 0.0, 0.0), Vector3::new(2.0, 0.0, 0.0)],
            &[Vector4::new(0.0, 1.0, 0.0, 0.5)],
        );
        assert!(matches!(
            result,
            Err(MeshError::MismatchedInstanceData {
                positions: 2,
                rotations: 1
            })
        ));
        assert_eq!(model.get_instance_number(), 1);
    }

    #[test]
    fn positions_only_get_identity_rotation() {
        let mut model = cubes(&[]);
        model.add_instances_at(&[Vector3::new(4.0, 5.0, 6.0)]);
        assert_eq!(*model.get_position(0).expect("in range"), Vector3::new(4.0, 5.0, 6.0));
        assert_eq!(
            model.get_transformation_matrix(0).expect("in range"),
            Matrix4::from_translation(Vector3::new(4.0, 5.0, 6.0))
        );
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let model = cubes(&[at(0.0), at(1.0)]);
        assert!(model.get_transformation(1).is_ok());
        assert!(matches!(
            model.get_transformation(2),
            Err(MeshError::InstanceOutOfRange { index: 2, count: 2 })
        ));
        assert!(model.get_position(2).is_err());
        assert!(model.get_rotation(2).is_err());
        assert!(model.get_transformation_matrix(2).is_err());
        assert!(model.get_bounding_box(2).is_err());
    }

    #[test]
    fn remove_instance_is_bounds_checked() {
        let mut model = cubes(&[at(0.0), at(1.0)]);
        assert_eq!(model.remove_instance(0).expect("in range"), at(0.0));
        assert!(model.remove_instance(1).is_err());
        assert_eq!(model.get_instance_number(), 1);
    }

    #[test]
    fn bounding_box_follows_instance() {
        let model = cubes(&[Transformation::new(
            Vector3::new(10.0, 0.0, 0.0),
            Transformation::identity_rotation(),
            Vector3::new(2.0, 2.0, 2.0),
        )]);
        let bounds = model.get_bounding_box(0).expect("in range");
        assert_eq!(bounds.min, Vector3::new(9.0, -1.0, -1.0));
        assert_eq!(bounds.max, Vector3::new(11.0, 1.0, 1.0));
    }

    #[test]
    fn instance_data_matches_transformations() {
        let model = cubes(&[at(1.0), at(2.0)]);
        let raw = model.instance_data();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].model(), at(2.0).get_transformation_matrix());
    }

    #[test]
    fn instances_beyond_capacity_are_dropped() {
        let model = cubes(&[at(1.0), at(2.0), at(3.0)]);
        let fitting = model.fitting_instances(2);
        assert_eq!(fitting.len(), 2);
        assert_eq!(fitting[0].model(), at(1.0).get_transformation_matrix());
        assert_eq!(fitting[1].model(), at(2.0).get_transformation_matrix());
    }

    #[test]
    fn instances_within_capacity_are_kept() {
        let model = cubes(&[at(1.0), at(2.0)]);
        assert_eq!(model.fitting_instances(2), model.instance_data());
        assert_eq!(model.fitting_instances(5).len(), 2);
        assert!(cubes(&[]).fitting_instances(0).is_empty());
        assert!(model.fitting_instances(0).is_empty());
    }

    #[test]
    fn model_path_comes_from_group() {
        let mut model = cubes(&[]);
        assert_eq!(model.model_path(), "cube");
        assert!(model.buffers().is_none());
        model.set_transformations(vec![at(7.0)]);
        assert_eq!(model.get_instance_number(), 1);
    }
}
