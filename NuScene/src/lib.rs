//! # NuScene
//!
//! A pure-Rust decoder for `.gsc` game scene containers.
//!
//! ## Supported Chunks
//!
//! - **TXGH** - texture directory
//! - **DISP** - display commands assigning materials to mesh parts
//! - **UMTL** - material table (revisions `0x94` to `0x96`)
//! - **DDS region** - BC1, BC3 and uncompressed RGBA texture records
//! - **MESH** - mesh parts with shared vertex and index buffers
//!
//! ## Quick Start
//!
//! ```no_run
//! use nuscene::{DecodeOptions, read_scene};
//!
//! let scene = read_scene("level.gsc", &DecodeOptions::new())?;
//! for part in scene.parts() {
//!     let vertices = scene.part_vertices(part).unwrap_or_default();
//!     let texture = scene.applicable_texture(part);
//!     println!("part {}: {} vertices, textured: {}", part.ordinal, vertices.len(), texture.is_some());
//! }
//! # Ok::<(), nuscene::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use nuscene::prelude::*;
//!
//! // SceneModel, SceneLoader, DecodeOptions, Error, Result and more
//! let loader = SceneLoader::new(DecodeOptions::geometry_only());
//! assert!(loader.current().is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `nuscene` command-line binary

pub mod converter;
pub mod error;
pub mod formats;
pub mod options;
pub mod scene;

// Re-exports for convenience
pub use error::{Error, Result};
pub use options::DecodeOptions;
pub use scene::{SceneLoader, SceneModel, decode_scene, read_scene};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::options::DecodeOptions;
    pub use crate::scene::{
        MIN_TEXTURE_ID, SceneLoader, SceneModel, SceneSummary, decode_scene, read_scene,
    };

    pub use crate::formats::gsc::{
        Diagnostic, IndexBuffer, MeshPart, ResourceId, SubRange, TextureBlob, TextureFormat,
        Vertex, VertexBuffer,
    };

    pub use crate::converter::{export_obj, export_textures};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
