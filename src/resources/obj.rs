//! Wavefront OBJ/MTL export.
//!
//! Faces reuse one index for position, texture coordinate and normal, so the
//! written file re-imports with `single_index` into the same vertex layout.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{data_structures::mesh::Mesh, error::MeshError};

/// Writes the OBJ body of `mesh`, referencing material `name` from `name.mtl`.
pub fn write_obj<W: Write>(mesh: &Mesh, name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "# {name}.obj")?;
    writeln!(out, "mtllib {name}.mtl")?;
    writeln!(out)?;
    for v in mesh.vertices() {
        writeln!(out, "v {} {} {}", v.position[0], v.position[1], v.position[2])?;
    }
    for v in mesh.vertices() {
        writeln!(out, "vt {} {}", v.texcoord[0], v.texcoord[1])?;
    }
    for v in mesh.vertices() {
        writeln!(out, "vn {} {} {}", v.normal[0], v.normal[1], v.normal[2])?;
    }
    writeln!(out, "usemtl {name}")?;
    for face in mesh.element_index().chunks_exact(3) {
        let (a, b, c) = (face[0] + 1, face[1] + 1, face[2] + 1);
        writeln!(out, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    out.flush()
}

/// Writes a material `name` whose texture slots point at placeholder files.
pub fn write_mtl<W: Write>(name: &str, out: &mut W) -> io::Result<()> {
    writeln!(out, "#replace ext by your image extension")?;
    writeln!(out, "newmtl {name}")?;
    writeln!(out, "illum 2")?;
    writeln!(out, "map_Kd {name}_diff.ext")?;
    writeln!(out, "map_Bump {name}_normal.ext")?;
    writeln!(out, "map_Ks {name}_spec.ext")?;
    out.flush()
}

fn write_file(
    path: &Path,
    kind: &'static str,
    write: impl FnOnce(&mut BufWriter<File>) -> io::Result<()>,
) -> Result<(), MeshError> {
    let to_error = |source| MeshError::Export {
        kind,
        path: path.to_path_buf(),
        source,
    };
    let mut out = BufWriter::new(File::create(path).map_err(to_error)?);
    write(&mut out).map_err(to_error)
}

impl Mesh {
    /// Saves the mesh as `dir/name.obj` and, with `write_mtl`, a companion
    /// `dir/name.mtl`.
    ///
    /// Meshes failing [`Mesh::validate`] are rejected before any file is created.
    pub fn save_obj(&self, dir: &Path, name: &str, write_mtl: bool) -> Result<(), MeshError> {
        self.validate()?;
        let obj_path = dir.join(format!("{name}.obj"));
        log::debug!("Exporting mesh to {}", obj_path.display());
        write_file(&obj_path, "obj", |out| write_obj(self, name, out))?;
        if write_mtl {
            write_file(&dir.join(format!("{name}.mtl")), "mtl", |out| {
                self::write_mtl(name, out)
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cgmath::Vector3;

    use super::*;

    fn written_obj(mesh: &Mesh) -> String {
        let mut out = Vec::new();
        write_obj(mesh, "plane", &mut out).expect("in-memory write");
        String::from_utf8(out).expect("utf-8")
    }

    #[test]
    fn obj_lists_attributes_then_faces() {
        let plane = Mesh::gen_plane(2.0, 2.0, 1.0, Vector3::new(0.0, 0.0, 0.0));
        let obj = written_obj(&plane);
        let lines: Vec<&str> = obj.lines().collect();
        assert_eq!(lines[0], "# plane.obj");
        assert_eq!(lines[1], "mtllib plane.mtl");
        assert_eq!(lines.iter().filter(|l| l.starts_with("v ")).count(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vt ")).count(), 4);
        assert_eq!(lines.iter().filter(|l| l.starts_with("vn ")).count(), 4);
        assert_eq!(lines[3], "v -1 0 1");
        assert!(lines.contains(&"vn 0 1 0"));
        assert!(lines.contains(&"usemtl plane"));
        assert!(lines.contains(&"f 1/1/1 2/2/2 3/3/3"));
        assert!(lines.contains(&"f 3/3/3 2/2/2 4/4/4"));
    }

    #[test]
    fn attribute_blocks_keep_order() {
        let obj = written_obj(&Mesh::gen_plane(2.0, 2.0, 1.0, Vector3::new(0.0, 0.0, 0.0)));
        let first = |prefix: &str| obj.lines().position(|l| l.starts_with(prefix));
        assert!(first("v ") < first("vt "));
        assert!(first("vt ") < first("vn "));
        assert!(first("vn ") < first("usemtl"));
        assert!(first("usemtl") < first("f "));
    }

    #[test]
    fn mtl_names_texture_slots() {
        let mut out = Vec::new();
        write_mtl("rock", &mut out).expect("in-memory write");
        let mtl = String::from_utf8(out).expect("utf-8");
        assert_eq!(
            mtl.lines().collect::<Vec<_>>(),
            vec![
                "#replace ext by your image extension",
                "newmtl rock",
                "illum 2",
                "map_Kd rock_diff.ext",
                "map_Bump rock_normal.ext",
                "map_Ks rock_spec.ext",
            ]
        );
    }
}
