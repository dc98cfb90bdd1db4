//! # Primitive Shape Generation
//!
//! Cube, plane and UV sphere generators. Every generator returns a complete
//! [`Mesh`] with its bounding box already computed.

use std::f32::consts::PI;

use cgmath::Vector3;

use crate::data_structures::{mesh::Mesh, vertex::VertexDescriptor};

impl Mesh {
    /// Unit cube centered at the origin, one vertex per face corner so faces
    /// keep their own normals and texture coordinates.
    pub fn gen_cube() -> Mesh {
        let v = VertexDescriptor::new;
        let vertices = vec![
            // +Z
            v([-0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 0.0]),
            v([0.5, -0.5, 0.5], [0.0, 0.0, 1.0], [0.0, 1.0]),
            v([-0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 0.0]),
            v([0.5, 0.5, 0.5], [0.0, 0.0, 1.0], [1.0, 1.0]),
            // +Y
            v([-0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 0.0]),
            v([0.5, 0.5, 0.5], [0.0, 1.0, 0.0], [0.0, 1.0]),
            v([-0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 0.0]),
            v([0.5, 0.5, -0.5], [0.0, 1.0, 0.0], [1.0, 1.0]),
            // -Z
            v([-0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 0.0]),
            v([0.5, 0.5, -0.5], [0.0, 0.0, -1.0], [0.0, 1.0]),
            v([-0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 0.0]),
            v([0.5, -0.5, -0.5], [0.0, 0.0, -1.0], [1.0, 1.0]),
            // -Y
            v([-0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 0.0]),
            v([0.5, -0.5, -0.5], [0.0, -1.0, 0.0], [0.0, 1.0]),
            v([-0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 0.0]),
            v([0.5, -0.5, 0.5], [0.0, -1.0, 0.0], [1.0, 1.0]),
            // +X, each triangle has its own corners
            v([0.5, -0.5, 0.5], [1.0, 0.0, 0.0], [0.0, 0.0]),
            v([0.5, -0.5, -0.5], [1.0, 0.0, 0.0], [0.0, 1.0]),
            v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
            v([0.5, 0.5, 0.5], [1.0, 0.0, 0.0], [1.0, 0.0]),
            v([0.5, 0.5, -0.5], [1.0, 0.0, 0.0], [1.0, 1.0]),
            // -X
            v([-0.5, -0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 1.0]),
            v([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            v([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
            v([-0.5, 0.5, -0.5], [-1.0, 0.0, 0.0], [0.0, 0.0]),
            v([-0.5, -0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 1.0]),
            v([-0.5, 0.5, 0.5], [-1.0, 0.0, 0.0], [1.0, 0.0]),
        ];

        #[rustfmt::skip]
        let element_index = vec![
            0, 1, 2,
            2, 1, 3,
            4, 5, 6,
            6, 5, 7,
            8, 9, 10,
            10, 9, 11,
            12, 13, 14,
            14, 13, 15,
            16, 17, 18,
            19, 17, 20,
            21, 22, 23,
            24, 25, 26,
        ];

        Mesh::from_parts(vertices, element_index)
    }

    /// A single `width` x `height` quad in the XZ plane facing +Y.
    ///
    /// Texture coordinates run from 0 to `texture_loop` so a tiling texture
    /// repeats that many times across the quad.
    pub fn gen_plane(width: f32, height: f32, texture_loop: f32, offset: Vector3<f32>) -> Mesh {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            VertexDescriptor::new([-hw + offset.x, offset.y, hh + offset.z], up, [0.0, 0.0]),
            VertexDescriptor::new([hw + offset.x, offset.y, hh + offset.z], up, [0.0, texture_loop]),
            VertexDescriptor::new([-hw + offset.x, offset.y, -hh + offset.z], up, [texture_loop, 0.0]),
            VertexDescriptor::new(
                [hw + offset.x, offset.y, -hh + offset.z],
                up,
                [texture_loop, texture_loop],
            ),
        ];

        Mesh::from_parts(vertices, vec![0, 1, 2, 2, 1, 3])
    }

    /// UV sphere of `radius` around `offset`.
    ///
    /// Produces `(latitude_bands + 1) * (longitude_bands + 1)` vertices: the
    /// first and last column of each ring share positions but not texture
    /// coordinates, so the seam is not wrapped.
    pub fn gen_sphere(
        latitude_bands: u32,
        longitude_bands: u32,
        radius: f32,
        offset: Vector3<f32>,
    ) -> Mesh {
        let mut mesh = Mesh::new();
        if latitude_bands == 0 || longitude_bands == 0 {
            log::warn!(
                "Sphere with {latitude_bands} latitude and {longitude_bands} longitude bands has no surface"
            );
            return mesh;
        }

        let (vertex_capacity, index_capacity) = sphere_capacity(latitude_bands, longitude_bands);
        let mut vertices = Vec::with_capacity(vertex_capacity);
        for lat in 0..=latitude_bands {
            let theta = PI * (lat as f32 / latitude_bands as f32);
            let (sin_theta, cos_theta) = theta.sin_cos();

            for long in 0..=longitude_bands {
                let phi = 2.0 * PI * (long as f32 / longitude_bands as f32);
                let (sin_phi, cos_phi) = phi.sin_cos();

                let x = sin_phi * sin_theta;
                let y = cos_theta;
                let z = cos_phi * sin_theta;

                let u = 1.0 - long as f32 / longitude_bands as f32;
                let v = 1.0 - lat as f32 / latitude_bands as f32;

                vertices.push(VertexDescriptor::new(
                    [x * radius + offset.x, y * radius + offset.y, z * radius + offset.z],
                    [x, y, z],
                    [u, v],
                ));
            }
        }

        let mut indices = Vec::with_capacity(index_capacity);
        for lat in 0..latitude_bands {
            for long in 0..longitude_bands {
                let first = lat * (longitude_bands + 1) + long;
                let second = first + longitude_bands + 1;
                indices.extend_from_slice(&[first, second, first + 1]);
                indices.extend_from_slice(&[second, second + 1, first + 1]);
            }
        }

        mesh.add_vertices(&vertices);
        mesh.add_element_indexes(&indices);
        mesh.compute_bounding_box();
        mesh
    }
}

/// Vertex and index counts of a UV sphere.
fn sphere_capacity(latitude_bands: u32, longitude_bands: u32) -> (usize, usize) {
    let (lat, long) = (latitude_bands as usize, longitude_bands as usize);
    ((lat + 1) * (long + 1), lat * long * 6)
}
