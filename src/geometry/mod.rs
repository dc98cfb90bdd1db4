//! # Procedural Geometry Generation
//!
//! Generators are associated functions on [`Mesh`](crate::data_structures::mesh::Mesh):
//!
//! - [`Mesh::gen_cube`](crate::data_structures::mesh::Mesh::gen_cube): unit cube with per-face normals
//! - [`Mesh::gen_plane`](crate::data_structures::mesh::Mesh::gen_plane): single textured quad
//! - [`Mesh::gen_sphere`](crate::data_structures::mesh::Mesh::gen_sphere): UV sphere
//! - [`Mesh::gen_grid`](crate::data_structures::mesh::Mesh::gen_grid): heightmap driven terrain grid
//!
//! ```rust
//! use flow_mesh::{data_structures::mesh::Mesh, Vector3};
//!
//! let cube = Mesh::gen_cube();
//! let sphere = Mesh::gen_sphere(16, 32, 1.0, Vector3::new(0.0, 0.0, 0.0));
//! let terrain = Mesh::gen_grid(64, 64, None, Vector3::new(10.0, 1.0, 10.0), 2.0, 2);
//! assert_eq!(cube.triangle_count(), 12);
//! assert_eq!(sphere.vertex_count(), 17 * 33);
//! assert_eq!(terrain.vertex_count(), 64 * 64);
//! ```

pub mod grid;
pub mod primitives;

pub use grid::sample_height;
