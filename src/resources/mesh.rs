use cgmath::{InnerSpace, Vector3};

use crate::{
    data_structures::{mesh::Mesh, vertex::VertexDescriptor},
    error::MeshError,
};

/**
 * Converts the models of a parsed OBJ file into meshes, one per model.
 *
 * `single_index` must have been set when loading so positions, normals and
 * texture coordinates share one index. Texture coordinates are taken as
 * written so an exported mesh re-imports unchanged.
 */
pub fn load_meshes(models: &[tobj::Model]) -> Vec<Result<Mesh, MeshError>> {
    models.iter().map(|m| mesh_from_obj(&m.mesh)).collect()
}

fn mesh_from_obj(m: &tobj::Mesh) -> Result<Mesh, MeshError> {
    let vertices = (0..m.positions.len() / 3)
        .map(|i| {
            VertexDescriptor::new(
                [
                    m.positions[i * 3],
                    m.positions[i * 3 + 1],
                    m.positions[i * 3 + 2],
                ],
                [
                    m.normals.get(i * 3).map_or(0.0, |f| *f),
                    m.normals.get(i * 3 + 1).map_or(0.0, |f| *f),
                    m.normals.get(i * 3 + 2).map_or(0.0, |f| *f),
                ],
                [
                    m.texcoords.get(i * 2).map_or(0.0, |f| *f),
                    m.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                ],
            )
        })
        .collect::<Vec<_>>();

    let mut mesh = Mesh::from_parts(vertices, m.indices.clone());
    mesh.validate()?;
    if m.normals.is_empty() {
        average_face_normals(&mut mesh);
    }
    Ok(mesh)
}

/// Fills in normals for files that carry none: every vertex gets the
/// normalized sum of the face normals of the triangles using it.
fn average_face_normals(mesh: &mut Mesh) {
    let mut sums = vec![Vector3::new(0.0f32, 0.0, 0.0); mesh.vertices.len()];
    for c in mesh.element_index.chunks_exact(3) {
        let pos0 = mesh.vertices[c[0] as usize].position();
        let pos1 = mesh.vertices[c[1] as usize].position();
        let pos2 = mesh.vertices[c[2] as usize].position();
        let face_normal = (pos1 - pos0).cross(pos2 - pos0);
        for &i in c {
            sums[i as usize] += face_normal;
        }
    }
    for (vertex, sum) in mesh.vertices.iter_mut().zip(sums) {
        if sum.magnitude2() > 0.0 {
            vertex.normal = sum.normalize().into();
        }
    }
}
