//! Errors surfaced by mesh generation, export and instance management.
//!
//! Loading from disk goes through `anyhow` (see [`crate::resources`]); the
//! variants here are the failures callers are expected to match on.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MeshError {
    /// The OBJ or MTL file could not be created or written.
    #[error("Unable to save mesh {kind} at \"{}\"", path.display())]
    Export {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Parallel position/rotation arrays passed to an instance insertion differ in length.
    #[error(
        "Trying to load position and rotation vector with different size ({positions} positions, {rotations} rotations)"
    )]
    MismatchedInstanceData { positions: usize, rotations: usize },
    #[error("Instance index {index} is out of range, there are only {count} instances")]
    InstanceOutOfRange { index: usize, count: usize },
    #[error("Index buffer of length {0} does not describe whole triangles")]
    IncompleteTriangle(usize),
    #[error("Element index {index} references a vertex beyond the {vertex_count} available")]
    IndexOutOfBounds { index: u32, vertex_count: usize },
}
