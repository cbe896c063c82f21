//! Vertex and index buffer slots.

use std::collections::BTreeMap;

use serde::Serialize;

use super::vertex_types::{AttributeDecode, Vertex, VertexAttribute};
use crate::error::{Error, Result};
use crate::formats::gsc::context::ParseContext;
use crate::formats::gsc::resource_id::{BufferRef, ResourceId};

/// Bytes following a vertex reuse discriminator.
const VERTEX_REUSE_LEN: usize = 8;
/// Bytes following an index reuse discriminator.
const INDEX_REUSE_LEN: usize = 4;
const INDEX_ELEMENT_SIZE: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VertexBuffer {
    pub id: ResourceId,
    pub vertices: Vec<Vertex>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexBuffer {
    pub id: ResourceId,
    pub indices: Vec<u16>,
}

fn read_vertex_records(ctx: &mut ParseContext, id: ResourceId) -> Result<Vec<Vertex>> {
    let cursor = &mut ctx.cursor;
    cursor.skip(4)?;
    let vertex_count = cursor.read_u32()?;
    let attribute_count = cursor.read_u32()?;

    let mut attributes = Vec::with_capacity(attribute_count.min(0x100) as usize);
    for _ in 0..attribute_count {
        let semantic = cursor.read_u8()?;
        let storage = cursor.read_u8()?;
        cursor.skip(1)?;
        attributes.push(VertexAttribute { semantic, storage });
    }

    let mut plan = Vec::with_capacity(attributes.len());
    for attribute in attributes {
        let step = attribute.plan();
        if let AttributeDecode::Skip(len) = step {
            if attribute.is_consumed_semantic() {
                ctx.diagnose(
                    "MESH",
                    format!(
                        "vertex buffer {id}: semantic {} stored as {} is not decoded",
                        attribute.semantic, attribute.storage
                    ),
                );
            } else {
                tracing::debug!(
                    "MESH: skipping semantic {} ({len} bytes)",
                    attribute.semantic
                );
            }
        }
        plan.push(step);
    }

    let stride: usize = plan.iter().map(|step| step.byte_len()).sum();
    if stride == 0 && vertex_count > 0 {
        return Err(Error::invariant(
            "MESH",
            format!("vertex buffer {id}: {vertex_count} vertices with a zero-byte stride"),
        ));
    }
    let cursor = &mut ctx.cursor;
    let wanted = (vertex_count as usize).saturating_mul(stride);
    if wanted > cursor.remaining() {
        return Err(Error::UnexpectedEof {
            position: cursor.position(),
            wanted,
        });
    }

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for _ in 0..vertex_count {
        let mut vertex = Vertex::default();
        for step in &plan {
            step.apply(cursor, &mut vertex)?;
        }
        vertices.push(vertex);
    }
    cursor.skip(4)?;

    tracing::debug!(
        "MESH: vertex buffer {id}: {vertex_count} vertices, {} attributes",
        plan.len()
    );
    Ok(vertices)
}

/// Read a part's vertex slots, returning the id of the first non-empty one.
pub(crate) fn read_vertex_slots(
    ctx: &mut ParseContext,
    buffers: &mut BTreeMap<ResourceId, VertexBuffer>,
    ordinal: u32,
) -> Result<ResourceId> {
    let slot_count = ctx.cursor.read_u32()?;
    if !(1..=2).contains(&slot_count) {
        return Err(Error::invariant(
            "MESH",
            format!("part {ordinal} declares {slot_count} vertex slots"),
        ));
    }

    let mut primary = None;
    for _ in 0..slot_count {
        let id = match BufferRef::decode(ctx.cursor.read_u32()?) {
            BufferRef::Empty => continue,
            BufferRef::Reuse(id) => {
                if !buffers.contains_key(&id) {
                    return Err(Error::DanglingReference { kind: "vertex", id: id.0 });
                }
                ctx.cursor.skip(VERTEX_REUSE_LEN)?;
                id
            }
            BufferRef::Fresh(_) => {
                let id = ctx.ids.allocate();
                let vertices = read_vertex_records(ctx, id)?;
                buffers.insert(id, VertexBuffer { id, vertices });
                id
            }
        };
        primary.get_or_insert(id);
    }

    primary.ok_or_else(|| Error::invariant("MESH", format!("part {ordinal} has no vertex buffer")))
}

pub(crate) fn read_index_slot(
    ctx: &mut ParseContext,
    buffers: &mut BTreeMap<ResourceId, IndexBuffer>,
    ordinal: u32,
) -> Result<ResourceId> {
    match BufferRef::decode(ctx.cursor.read_u32()?) {
        // A part draws through its index buffer, so an empty slot cannot
        // produce a usable part.
        BufferRef::Empty => Err(Error::invariant(
            "MESH",
            format!("part {ordinal} has no index buffer"),
        )),
        BufferRef::Reuse(id) => {
            if !buffers.contains_key(&id) {
                return Err(Error::DanglingReference { kind: "index", id: id.0 });
            }
            ctx.cursor.skip(INDEX_REUSE_LEN)?;
            Ok(id)
        }
        BufferRef::Fresh(_) => {
            let id = ctx.ids.allocate();
            let cursor = &mut ctx.cursor;
            cursor.skip(4)?;
            let count = cursor.read_u32()?;
            let element_size = cursor.read_u32()?;
            if element_size != INDEX_ELEMENT_SIZE {
                return Err(Error::invariant(
                    "MESH",
                    format!("index buffer {id} has {element_size}-byte elements"),
                ));
            }
            let mut indices = Vec::with_capacity(count.min(0x10000) as usize);
            for _ in 0..count {
                indices.push(cursor.read_u16()?);
            }
            tracing::debug!("MESH: index buffer {id}: {count} indices");
            buffers.insert(id, IndexBuffer { id, indices });
            Ok(id)
        }
    }
}
