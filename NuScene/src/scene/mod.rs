//! Decoded scenes.
//!
//! A [`SceneModel`] is the only thing a load produces: mesh parts, the
//! buffers they slice, the texture records and whatever non-fatal
//! inconsistencies were noticed on the way. It is never modified after
//! [`decode_scene`] returns it.

mod assembler;

use std::collections::BTreeMap;

use serde::Serialize;

pub use assembler::{SceneLoader, decode_scene, read_scene};

use crate::formats::gsc::{
    Diagnostic, IndexBuffer, MeshPart, ResourceId, SubRange, TextureBlob, TextureFormat, Vertex,
    VertexBuffer,
};

/// Smallest local texture id that can name a texture slot.
///
/// Low ids are reserved for non-texture resources, but the reserved range
/// is not known, so only negative ids are rejected. Raise this once the
/// range is established.
pub const MIN_TEXTURE_ID: i32 = 0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneModel {
    pub(crate) parts: Vec<MeshPart>,
    pub(crate) vertex_buffers: BTreeMap<ResourceId, VertexBuffer>,
    pub(crate) index_buffers: BTreeMap<ResourceId, IndexBuffer>,
    pub(crate) textures: BTreeMap<u32, TextureBlob>,
    pub(crate) texture_names: Vec<String>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl SceneModel {
    /// Mesh parts in file order.
    #[must_use]
    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    #[must_use]
    pub fn vertex_buffers(&self) -> &BTreeMap<ResourceId, VertexBuffer> {
        &self.vertex_buffers
    }

    #[must_use]
    pub fn index_buffers(&self) -> &BTreeMap<ResourceId, IndexBuffer> {
        &self.index_buffers
    }

    /// Texture records keyed by slot.
    #[must_use]
    pub fn textures(&self) -> &BTreeMap<u32, TextureBlob> {
        &self.textures
    }

    /// Names of the texture directory's named entries; slot `n` is the
    /// `n`th name.
    #[must_use]
    pub fn texture_names(&self) -> &[String] {
        &self.texture_names
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The vertices `part` draws from, or `None` if its window does not fit
    /// the buffer.
    #[must_use]
    pub fn part_vertices(&self, part: &MeshPart) -> Option<&[Vertex]> {
        let buffer = self.vertex_buffers.get(&part.vertex_buffer)?;
        buffer.vertices.get(part.vertex_range.range()?)
    }

    /// The indices `part` draws, or `None` if its window does not fit the
    /// buffer.
    #[must_use]
    pub fn part_indices(&self, part: &MeshPart) -> Option<&[u16]> {
        let buffer = self.index_buffers.get(&part.index_buffer)?;
        buffer.indices.get(part.index_range.range()?)
    }

    /// The texture a viewer should bind for `part`; `None` means untextured.
    #[must_use]
    pub fn applicable_texture(&self, part: &MeshPart) -> Option<&TextureBlob> {
        let id = part.texture.filter(|id| *id >= MIN_TEXTURE_ID)?;
        self.textures.get(&u32::try_from(id).ok()?)
    }

    /// Serialisable overview of the scene.
    #[must_use]
    pub fn summary(&self) -> SceneSummary {
        let textures = self
            .textures
            .values()
            .map(|blob| TextureSummary {
                slot: blob.slot,
                name: self.texture_names.get(blob.slot as usize).cloned(),
                format: blob.format,
                width: blob.width,
                height: blob.height,
                mip_count: blob.mip_count,
                cubemap: blob.cubemap,
                bytes: blob.data.len(),
            })
            .collect();

        let parts = self
            .parts
            .iter()
            .map(|part| PartSummary {
                ordinal: part.ordinal,
                vertex_buffer: part.vertex_buffer,
                index_buffer: part.index_buffer,
                index_range: part.index_range,
                vertex_range: part.vertex_range,
                material: part.material,
                texture: part.texture,
                textured: self.applicable_texture(part).is_some(),
            })
            .collect();

        SceneSummary {
            vertex_buffer_count: self.vertex_buffers.len(),
            index_buffer_count: self.index_buffers.len(),
            vertex_count: self.vertex_buffers.values().map(|b| b.vertices.len()).sum(),
            index_count: self.index_buffers.values().map(|b| b.indices.len()).sum(),
            texture_names: self.texture_names.clone(),
            textures,
            parts,
            diagnostics: self.diagnostics.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub vertex_buffer_count: usize,
    pub index_buffer_count: usize,
    pub vertex_count: usize,
    pub index_count: usize,
    pub texture_names: Vec<String>,
    pub textures: Vec<TextureSummary>,
    pub parts: Vec<PartSummary>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextureSummary {
    pub slot: u32,
    pub name: Option<String>,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub cubemap: bool,
    /// Record length, header included.
    pub bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartSummary {
    pub ordinal: u32,
    pub vertex_buffer: ResourceId,
    pub index_buffer: ResourceId,
    pub index_range: SubRange,
    pub vertex_range: SubRange,
    pub material: Option<u32>,
    pub texture: Option<i32>,
    /// Whether the texture resolves to a loaded record.
    pub textured: bool,
}
