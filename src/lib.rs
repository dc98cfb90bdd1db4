//! flow-mesh
//!
//! Procedural mesh generation and instanced geometry management for wgpu
//! renderers. Meshes are plain CPU-side vertex/index arrays until they are
//! uploaded; instanced models share one uploaded geometry between any number
//! of per-instance transformations and render them with one draw call.
//!
//! High-level modules
//! - `data_structures`: vertices, bounding boxes, meshes, textures and instances
//! - `error`: errors callers are expected to match on
//! - `geometry`: cube, plane, sphere and heightmap grid generators
//! - `resources`: OBJ import/export, heightmaps and texture loading
//!

pub mod data_structures;
pub mod error;
pub mod geometry;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use error::MeshError;

/// Installs the platform logger. `RUST_LOG` controls the level natively.
///
/// Safe to call more than once; later calls only print a warning.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            println!("Warning: Could not initialize logger: {}", e);
        }
    }
}
