//! Heightmap driven grid meshes.
//!
//! The grid lies in the XZ plane; heights come from the red channel of an
//! optional heightmap, smoothed over a square window whose out-of-range
//! samples are mirrored back into the image.

use cgmath::{InnerSpace, Vector3};

use crate::data_structures::{
    mesh::Mesh,
    texture::{CHANNEL_STRIDE, TextureData},
    vertex::VertexDescriptor,
};

/// Reflects `index` into `0..len` without repeating the edge texel
/// (`-1` maps to `1`, `len` maps to `len - 2`).
fn mirror(index: i64, len: i64) -> i64 {
    if len <= 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let wrapped = index.rem_euclid(period);
    if wrapped < len { wrapped } else { period - wrapped }
}

fn red(image: &dyn TextureData, row: i64, col: i64) -> f32 {
    let texel = (row * image.width() as i64 + col) as usize;
    image
        .data()
        .get(texel * CHANNEL_STRIDE)
        .map_or(0.0, |&value| value as f32 / 255.0)
}

/// Mean red value in `[0, 1]` of the `(2 * padding)²` window whose corner
/// offsets run from `-padding` to `padding - 1` around texel (`row`, `col`).
///
/// A `padding` of zero samples the single texel.
pub fn sample_height(image: &dyn TextureData, row: i64, col: i64, padding: u32) -> f32 {
    let (width, height) = (image.width() as i64, image.height() as i64);
    if width == 0 || height == 0 {
        return 0.0;
    }
    if padding == 0 {
        return red(image, mirror(row, height), mirror(col, width));
    }

    let padding = padding as i64;
    let mut sum = 0.0;
    for y in -padding..padding {
        let r = mirror(row + y, height);
        for x in -padding..padding {
            sum += red(image, r, mirror(col + x, width));
        }
    }
    sum / ((2 * padding) * (2 * padding)) as f32
}

impl Mesh {
    /// A `width` x `height` vertex grid spanning `scale` and centered on the
    /// origin in X and Z.
    ///
    /// With a heightmap, each vertex height is [`sample_height`] with a
    /// padding of `smooth`, multiplied by `intensity`. The mean height is then
    /// subtracted so the mesh is vertically centered. Normals are per face:
    /// each triangle writes its normal to its three vertices, later triangles
    /// overwriting earlier ones.
    pub fn gen_grid(
        width: u32,
        height: u32,
        heightmap: Option<&dyn TextureData>,
        scale: Vector3<f32>,
        intensity: f32,
        smooth: u32,
    ) -> Mesh {
        if width < 2 || height < 2 {
            log::warn!("A {width}x{height} grid has no faces, generating vertices only");
        }
        let columns = (width.max(2) - 1) as f32;
        let rows = (height.max(2) - 1) as f32;
        let offset = Vector3::new(0.5 * scale.x, 0.0, 0.5 * scale.z);

        log::debug!("Vertices construction");
        let mut vertices = Vec::with_capacity(grid_capacity(width, height).0);
        let mut height_mean = 0.0;
        for i in 0..height {
            for j in 0..width {
                let z_value = heightmap.map_or(0.0, |image| {
                    let tex_i = (i as f32 / height as f32 * image.height() as f32) as i64;
                    let tex_j = (j as f32 / width as f32 * image.width() as f32) as i64;
                    sample_height(image, tex_i, tex_j, smooth)
                }) * intensity;

                let pos = Vector3::new(j as f32 / columns, z_value, i as f32 / rows);
                let pos = Vector3::new(pos.x * scale.x, pos.y * scale.y, pos.z * scale.z) - offset;
                height_mean += pos.y;

                vertices.push(VertexDescriptor::new(
                    pos.into(),
                    [0.0, 1.0, 0.0],
                    [j as f32 / columns, 1.0 - i as f32 / rows],
                ));
            }
        }

        if !vertices.is_empty() {
            height_mean /= vertices.len() as f32;
            for vertex in vertices.iter_mut() {
                vertex.position[1] -= height_mean;
            }
        }

        log::debug!("Normal & Ids generation");
        let mut indices = Vec::with_capacity(grid_capacity(width, height).1);
        for i in 0..height.saturating_sub(1) {
            for j in 0..width.saturating_sub(1) {
                let p0 = j + i * width;
                let p1 = (j + 1) + i * width;
                let p2 = j + (i + 1) * width;
                let p3 = (j + 1) + (i + 1) * width;

                for triangle in [[p0, p1, p2], [p2, p1, p3]] {
                    write_face_normal(&mut vertices, triangle);
                    indices.extend_from_slice(&triangle);
                }
            }
        }

        let mut mesh = Mesh::new();
        mesh.add_vertices(&vertices);
        mesh.add_element_indexes(&indices);
        mesh.compute_bounding_box();
        mesh
    }
}

/// Vertex and index counts of a `width` x `height` grid.
fn grid_capacity(width: u32, height: u32) -> (usize, usize) {
    let (width, height) = (width as usize, height as usize);
    (
        width * height,
        width.saturating_sub(1) * height.saturating_sub(1) * 6,
    )
}

fn write_face_normal(vertices: &mut [VertexDescriptor], [a, b, c]: [u32; 3]) {
    let origin = vertices[a as usize].position();
    let edge0 = vertices[b as usize].position() - origin;
    let edge1 = vertices[c as usize].position() - origin;
    let normal = edge1.cross(edge0);
    if normal.magnitude2() <= f32::EPSILON * f32::EPSILON {
        return;
    }
    let normal: [f32; 3] = normal.normalize().into();
    for index in [a, b, c] {
        vertices[index as usize].normal = normal;
    }
}
