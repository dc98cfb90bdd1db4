use std::{
    io::{BufReader, Cursor},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::data_structures::mesh::Mesh;

/**
 * This module contains all logic for loading meshes/textures from external files
 * and for writing meshes back out.
 */
pub mod mesh;
pub mod obj;
pub mod texture;

/// Paths that exist as given are used directly, anything else is looked up
/// under `./assets/`.
pub fn resolve_asset(file_name: &str) -> PathBuf {
    let path = Path::new(file_name);
    if path.exists() {
        return path.to_path_buf();
    }
    Path::new("./").join("assets").join(file_name)
}

pub fn load_string(file_name: &str) -> anyhow::Result<String> {
    let path = resolve_asset(file_name);
    std::fs::read_to_string(&path).with_context(|| format!("Unable to read {}", path.display()))
}

pub fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = resolve_asset(file_name);
    std::fs::read(&path).with_context(|| format!("Unable to read {}", path.display()))
}

/// Loads every model of an OBJ file as a triangulated, single-index mesh.
///
/// Materials are resolved next to the OBJ file but only reported; binding
/// textures is left to the caller through [`Mesh::attach_texture`].
pub fn load_model_obj(file_name: &str) -> anyhow::Result<Vec<Mesh>> {
    let obj_text = load_string(file_name)?;
    let mut obj_reader = BufReader::new(Cursor::new(obj_text));
    let obj_dir = Path::new(file_name)
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let (models, obj_materials) = tobj::load_obj_buf(
        &mut obj_reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
        |p| {
            let mtl_path = obj_dir.join(p);
            match mtl_path.to_str().map(load_string) {
                Some(Ok(mat_text)) => tobj::load_mtl_buf(&mut BufReader::new(Cursor::new(mat_text))),
                _ => Err(tobj::LoadError::OpenFileFailed),
            }
        },
    )
    .with_context(|| format!("Unable to parse {file_name}"))?;

    match obj_materials {
        Ok(materials) => log::debug!("{file_name} references {} materials", materials.len()),
        Err(e) => log::debug!("No materials loaded for {file_name}: {e}"),
    }

    let meshes = mesh::load_meshes(&models)
        .into_iter()
        .enumerate()
        .filter_map(|(idx, result)| match result {
            Ok(mesh) => Some(mesh),
            Err(e) => {
                log::warn!(
                    "Mesh at index {} in file {} could not be loaded ({}). Make sure you use the right scale in your .obj export settings.",
                    idx,
                    file_name,
                    e
                );
                None
            }
        })
        .collect();
    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_paths_are_not_rebased() {
        assert_eq!(resolve_asset("Cargo.toml"), PathBuf::from("Cargo.toml"));
        assert_eq!(
            resolve_asset("cube.obj"),
            Path::new("./").join("assets").join("cube.obj")
        );
    }

    #[test]
    fn unreadable_file_reports_path() {
        let err = load_string("missing.obj").expect_err("file does not exist");
        assert!(err.to_string().contains("missing.obj"));
    }
}
