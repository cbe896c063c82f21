//! Export utilities
//!
//! This module writes decoded scenes back out in formats other tools read:
//! - Wavefront OBJ for geometry
//! - standalone `.dds` files for the texture records

pub mod obj;
pub mod textures;

/// Progress callback type for export operations.
/// The callback receives the path of each file as it is written.
pub type ProgressCallback<'a> = &'a dyn Fn(&str);

pub use obj::{export_obj, write_obj};
pub use textures::{export_textures, export_textures_with_progress, texture_file_name};
