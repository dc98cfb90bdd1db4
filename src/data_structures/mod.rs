//! Mesh data structures: vertices, bounds, meshes, textures and instances.
//!
//! - `vertex` holds the per-vertex record and the vertex layout trait
//! - `bounding_box` contains axis-aligned bounds and their transformation
//! - `mesh` is the CPU-side geometry plus its GPU buffers
//! - `texture` contains the texture capability and its GPU wrapper
//! - `transformation` holds per-instance transformation data
//! - `model_mesh_group` groups the meshes loaded from one file
//! - `model_mesh_instanced` renders one group many times with a single draw call

pub mod bounding_box;
pub mod mesh;
pub mod model_mesh_group;
pub mod model_mesh_instanced;
pub mod texture;
pub mod transformation;
pub mod vertex;
