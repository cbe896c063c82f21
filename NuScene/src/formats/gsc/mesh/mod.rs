//! MESH chunk reader.
//!
//! Each part names one or two vertex buffers and one index buffer, either
//! introducing them inline or pointing back at a buffer an earlier part
//! introduced. The part's trailer carries skinning and morph data this
//! decoder skips, but whose presence still moves the id counter.

mod buffers;
pub mod vertex_types;

use std::collections::BTreeMap;
use std::ops::Range;

use serde::Serialize;

pub use buffers::{IndexBuffer, VertexBuffer};
pub use vertex_types::{AttributeSemantic, StorageFormat, Vertex, mini_float, storage_size};

use super::chunk::{self, ChunkTag};
use super::context::ParseContext;
use super::resource_id::ResourceId;
use crate::error::{Error, Result};

/// Oldest MESH revision with the layout read here.
pub const MIN_MESH_VERSION: u32 = 0x30;

/// Transform and bounds block between the morph lists and the sentinels.
const TRANSFORM_BLOCK_LEN: usize = 44;
const RELATIVE_POSITION_LEN: usize = 12;
const RELATIVE_TUPLE_LEN: usize = 8;

/// `(offset, count)` window into a shared buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubRange {
    pub offset: u32,
    pub count: u32,
}

impl SubRange {
    /// The window as a slice range; `None` if it overflows `usize`.
    #[must_use]
    pub fn range(self) -> Option<Range<usize>> {
        let start = self.offset as usize;
        start
            .checked_add(self.count as usize)
            .map(|end| start..end)
    }
}

/// One drawable piece of the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeshPart {
    /// Position of the part in the MESH chunk.
    pub ordinal: u32,
    pub vertex_buffer: ResourceId,
    pub index_buffer: ResourceId,
    pub index_range: SubRange,
    pub vertex_range: SubRange,
    /// Material ordinal assigned through the display list.
    pub material: Option<u32>,
    /// Local texture id of that material.
    pub texture: Option<i32>,
}

/// Everything the MESH chunk yields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshChunk {
    pub version: u32,
    pub parts: Vec<MeshPart>,
    pub vertex_buffers: BTreeMap<ResourceId, VertexBuffer>,
    pub index_buffers: BTreeMap<ResourceId, IndexBuffer>,
}

fn expect_zero(value: u32, what: &str) -> Result<()> {
    if value == 0 {
        Ok(())
    } else {
        Err(Error::invariant(
            "MESH",
            format!("{what} is 0x{value:X}, expected 0"),
        ))
    }
}

fn read_relative_positions(ctx: &mut ParseContext) -> Result<()> {
    let list_count = ctx.cursor.read_u32()?;
    for _ in 0..list_count {
        let kind = ctx.cursor.read_u32()?;
        let count = ctx.cursor.read_u32()? as usize;
        ctx.cursor.skip(count.saturating_mul(RELATIVE_POSITION_LEN))?;
        if kind == 0 {
            let tuples = ctx.cursor.read_u32()? as usize;
            ctx.cursor.skip(tuples.saturating_mul(RELATIVE_TUPLE_LEN))?;
            ctx.ids.advance(if tuples > 0 { 3 } else { 2 });
        } else {
            ctx.ids.advance(2);
        }
    }
    Ok(())
}

/// Skinning, morph data, transform and sentinels closing every part.
fn read_part_trailer(ctx: &mut ParseContext) -> Result<()> {
    ctx.cursor.skip(4)?;
    let skin_len = ctx.cursor.read_u32()?;
    ctx.cursor.skip(skin_len as usize)?;
    if skin_len > 0 {
        ctx.ids.advance(1);
    }

    if ctx.cursor.read_u32()? != 0 {
        read_relative_positions(ctx)?;
    }

    ctx.cursor.skip(TRANSFORM_BLOCK_LEN)?;
    expect_zero(ctx.cursor.read_u32()?, "first part sentinel")?;
    ctx.cursor.skip(8)?;
    expect_zero(ctx.cursor.read_u32()?, "second part sentinel")?;
    ctx.cursor.skip(12)
}

fn read_part(ctx: &mut ParseContext, mesh: &mut MeshChunk, ordinal: u32) -> Result<MeshPart> {
    tracing::debug!(
        "MESH: part {ordinal} at 0x{:08X}",
        ctx.cursor.position()
    );

    let vertex_buffer = buffers::read_vertex_slots(ctx, &mut mesh.vertex_buffers, ordinal)?;
    expect_zero(ctx.cursor.read_u32()?, "fast-blend vertex buffer size")?;
    let index_buffer = buffers::read_index_slot(ctx, &mut mesh.index_buffers, ordinal)?;

    let cursor = &mut ctx.cursor;
    let index_offset = cursor.read_u32()?;
    let index_count = cursor.read_u32()?;
    let vertex_offset = cursor.read_u32()?;
    cursor.skip(2)?;
    let vertex_count = cursor.read_u32()?;

    read_part_trailer(ctx)?;
    ctx.ids.advance(1);

    Ok(MeshPart {
        ordinal,
        vertex_buffer,
        index_buffer,
        index_range: SubRange {
            offset: index_offset,
            count: index_count,
        },
        vertex_range: SubRange {
            offset: vertex_offset,
            count: vertex_count,
        },
        material: None,
        texture: None,
    })
}

/// Read every mesh part, collecting the buffers they introduce.
pub fn read_meshes(ctx: &mut ParseContext) -> Result<MeshChunk> {
    chunk::enter(&mut ctx.cursor, ChunkTag::Mesh)?;

    let version = ctx.cursor.read_u32()?;
    if version < MIN_MESH_VERSION {
        return Err(Error::UnsupportedVersion {
            chunk: "MESH",
            version,
        });
    }
    ctx.cursor.skip(4)?;
    let part_count = ctx.cursor.read_u32()?;
    tracing::debug!("MESH: version 0x{version:X}, {part_count} parts");

    let mut mesh = MeshChunk {
        version,
        ..MeshChunk::default()
    };
    for ordinal in 0..part_count {
        let part = read_part(ctx, &mut mesh, ordinal)?;
        mesh.parts.push(part);
    }

    tracing::debug!(
        "MESH: {} vertex buffers, {} index buffers, next id {}",
        mesh.vertex_buffers.len(),
        mesh.index_buffers.len(),
        ctx.ids.peek()
    );
    Ok(mesh)
}
