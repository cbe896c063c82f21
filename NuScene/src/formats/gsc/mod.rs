//! `.gsc` scene container readers.
//!
//! A container is a sequence of FourCC-tagged chunks whose tags are stored
//! byte-reversed. Chunks are located by scanning rather than through a
//! table, and must be read in a fixed order because every reader advances
//! the shared [`ResourceIdAllocator`].

pub mod chunk;
pub mod context;
pub mod cursor;
pub mod dds;
pub mod disp;
pub mod mesh;
pub mod resource_id;
pub mod txgh;
pub mod umtl;

#[cfg(test)]
pub(crate) mod test_support;

pub use chunk::ChunkTag;
pub use context::{Diagnostic, ParseContext};
pub use cursor::{ByteCursor, Endian};
pub use dds::{TextureBlob, TextureFormat, read_texture_blobs, record_len};
pub use disp::{DisplayList, read_display_list};
pub use mesh::{IndexBuffer, MeshChunk, MeshPart, SubRange, Vertex, VertexBuffer, read_meshes};
pub use resource_id::{BufferRef, RESOURCE_ID_BASE, ResourceId, ResourceIdAllocator};
pub use txgh::{TextureDirectory, read_texture_directory};
pub use umtl::{MaterialEntry, MaterialLayout, MaterialTable, read_material_table};
