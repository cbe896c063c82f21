//! DISP display command reader.
//!
//! The display list assigns materials to mesh parts indirectly: clip objects
//! list material indices alongside indices into a command table, and each
//! command names the mesh part instance it draws.

use std::collections::BTreeMap;

use super::chunk::{self, ChunkTag};
use super::context::ParseContext;
use crate::error::{Error, Result};

/// The only DISP revision this decoder understands.
pub const DISP_VERSION: u32 = 15;

/// Resolved display list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    /// Instance index of every command, in table order.
    pub command_indices: Vec<u32>,
    /// Mesh part ordinal -> material ordinal. Absent parts have no material.
    pub mesh_materials: BTreeMap<u32, u32>,
}

impl DisplayList {
    /// Material assigned to the mesh part at `ordinal`.
    #[must_use]
    pub fn material_for(&self, ordinal: u32) -> Option<u32> {
        self.mesh_materials.get(&ordinal).copied()
    }
}

pub fn read_display_list(ctx: &mut ParseContext) -> Result<DisplayList> {
    chunk::enter(&mut ctx.cursor, ChunkTag::Disp)?;
    let cursor = &mut ctx.cursor;

    let version = cursor.read_u32()?;
    if version != DISP_VERSION {
        return Err(Error::UnsupportedVersion {
            chunk: "DISP",
            version,
        });
    }

    let path = cursor.read_prefixed_string()?;
    tracing::debug!("DISP: path {path:?}");

    let command_count = cursor.read_u32()?;
    let mut command_indices = Vec::with_capacity(command_count.min(0x10000) as usize);
    for _ in 0..command_count {
        let _opcode = cursor.read_u8()?;
        cursor.skip(1)?;
        command_indices.push(cursor.read_u32()?);
    }

    let mut mesh_materials = BTreeMap::new();
    let clip_count = cursor.read_u32()?;
    for clip in 0..clip_count {
        let material_count = cursor.read_u32()?;
        let mut material_indices = Vec::with_capacity(material_count.min(0x10000) as usize);
        for _ in 0..material_count {
            material_indices.push(cursor.read_u32()?);
        }

        let item_count = cursor.read_u32()?;
        for position in 0..item_count as usize {
            let command = cursor.read_u32()?;
            let instance = *command_indices.get(command as usize).ok_or_else(|| {
                Error::invariant(
                    "DISP",
                    format!("clip {clip} references command {command} of {command_count}"),
                )
            })?;
            let material = *material_indices.get(position).ok_or_else(|| {
                Error::invariant(
                    "DISP",
                    format!("clip {clip} item {position} has no material ({material_count} listed)"),
                )
            })?;
            mesh_materials.insert(instance, material);
        }
    }

    tracing::debug!(
        "DISP: {command_count} commands, {clip_count} clip objects, {} parts with materials",
        mesh_materials.len()
    );

    Ok(DisplayList {
        command_indices,
        mesh_materials,
    })
}
