//! UMTL material table reader.
//!
//! Material records are mostly fixed-layout blocks this decoder does not
//! interpret; only the local texture ids and the name are read. Two fields
//! change width between revisions, captured in [`MaterialLayout`].

use super::chunk::{self, ChunkTag};
use super::context::ParseContext;
use crate::error::{Error, Result};

const RECORD_PREFIX_LEN: usize = 0x50;
const LOCAL_TEXTURE_SLOTS: usize = 18;
const PRE_NAME_BLOCK_LEN: usize = 0x24;
const POST_NAME_BLOCK_LEN: usize = 0x40;
const ARRAY_STRIDE: usize = 3;

/// Record layout differences between UMTL revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialLayout {
    pub version: u32,
    /// A 2-byte field sits in front of the material name.
    pub has_extra_field: bool,
    /// Length of the block closing every record.
    pub trailing_len: usize,
}

/// Supported revisions.
pub const MATERIAL_LAYOUTS: [MaterialLayout; 3] = [
    MaterialLayout {
        version: 0x94,
        has_extra_field: false,
        trailing_len: 15,
    },
    MaterialLayout {
        version: 0x95,
        has_extra_field: true,
        trailing_len: 15,
    },
    MaterialLayout {
        version: 0x96,
        has_extra_field: true,
        trailing_len: 16,
    },
];

impl MaterialLayout {
    #[must_use]
    pub fn for_version(version: u32) -> Option<Self> {
        MATERIAL_LAYOUTS
            .iter()
            .copied()
            .find(|layout| layout.version == version)
    }
}

/// One material as far as scene assembly cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialEntry {
    pub name: String,
    /// First local texture id; negative means untextured.
    pub primary_texture: i16,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialTable {
    pub version: u32,
    pub materials: Vec<MaterialEntry>,
}

impl MaterialTable {
    /// Texture id of the material at `index`, if it has one.
    #[must_use]
    pub fn primary_texture(&self, index: u32) -> Option<i32> {
        self.materials
            .get(index as usize)
            .map(|m| i32::from(m.primary_texture))
            .filter(|id| *id >= 0)
    }
}

/// Skip a `u32`-counted array of 3-byte elements.
fn skip_triplets(ctx: &mut ParseContext) -> Result<()> {
    let count = ctx.cursor.read_u32()? as usize;
    ctx.cursor.skip(count * ARRAY_STRIDE)
}

fn read_material(
    ctx: &mut ParseContext,
    layout: MaterialLayout,
    index: u32,
) -> Result<MaterialEntry> {
    ctx.cursor.skip(RECORD_PREFIX_LEN)?;
    let mut local_textures = [0i16; LOCAL_TEXTURE_SLOTS];
    for slot in &mut local_textures {
        *slot = ctx.cursor.read_i16()?;
    }
    skip_triplets(ctx)?;

    ctx.cursor.skip(PRE_NAME_BLOCK_LEN)?;
    if layout.has_extra_field {
        ctx.cursor.skip(2)?;
    }
    let name = ctx.cursor.read_prefixed_string()?;

    ctx.cursor.skip(POST_NAME_BLOCK_LEN)?;
    skip_triplets(ctx)?;
    skip_triplets(ctx)?;

    let check = ctx.cursor.read_i16()?;
    ctx.cursor.skip(layout.trailing_len)?;

    let primary_texture = local_textures[0];
    if check != primary_texture {
        ctx.diagnose(
            "UMTL",
            format!(
                "material {index} ({name}): texture {primary_texture} does not match cross-check {check}"
            ),
        );
    }
    tracing::debug!("UMTL: material {index} {name:?} -> texture {primary_texture}");

    Ok(MaterialEntry {
        name,
        primary_texture,
    })
}

pub fn read_material_table(ctx: &mut ParseContext) -> Result<MaterialTable> {
    chunk::enter(&mut ctx.cursor, ChunkTag::Umtl)?;

    let version = ctx.cursor.read_u32()?;
    let layout = MaterialLayout::for_version(version).ok_or(Error::UnsupportedVersion {
        chunk: "UMTL",
        version,
    })?;

    let count = ctx.cursor.read_u32()?;
    tracing::debug!("UMTL: version 0x{version:X}, {count} materials");

    let mut materials = Vec::with_capacity(count.min(0x10000) as usize);
    for index in 0..count {
        materials.push(read_material(ctx, layout, index)?);
    }

    Ok(MaterialTable { version, materials })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gsc::test_support::Bytes;

    fn material(b: &mut Bytes, layout: MaterialLayout, name: &str, texture: i16, check: i16) {
        b.zeros(RECORD_PREFIX_LEN);
        b.i16(texture);
        for _ in 1..LOCAL_TEXTURE_SLOTS {
            b.i16(-1);
        }
        b.u32(2).zeros(2 * ARRAY_STRIDE);
        b.zeros(PRE_NAME_BLOCK_LEN);
        if layout.has_extra_field {
            b.u16(0);
        }
        b.string(name);
        b.zeros(POST_NAME_BLOCK_LEN);
        b.u32(0);
        b.u32(1).zeros(ARRAY_STRIDE);
        b.i16(check);
        b.zeros(layout.trailing_len);
    }

    fn table(version: u32, entries: &[(&str, i16, i16)]) -> Bytes {
        let layout = MaterialLayout::for_version(version).unwrap();
        let mut b = Bytes::new();
        b.raw(b"LTMU").u32(version).u32(entries.len() as u32);
        for (name, texture, check) in entries {
            material(&mut b, layout, name, *texture, *check);
        }
        b
    }

    #[test]
    fn test_every_revision_reads_to_the_end() {
        for layout in MATERIAL_LAYOUTS {
            let b = table(layout.version, &[("stone", 3, 3), ("water", -1, -1)]);
            let mut ctx = b.context();
            let materials = read_material_table(&mut ctx).unwrap();
            assert_eq!(materials.materials.len(), 2);
            assert_eq!(materials.materials[0].name, "stone");
            assert_eq!(materials.primary_texture(0), Some(3));
            assert_eq!(materials.primary_texture(1), None);
            assert_eq!(materials.primary_texture(2), None);
            assert_eq!(ctx.cursor.remaining(), 0, "version 0x{:X}", layout.version);
            assert!(ctx.diagnostics().is_empty());
        }
    }

    #[test]
    fn test_cross_check_mismatch_is_only_a_diagnostic() {
        let mut ctx = table(0x95, &[("moss", 4, 6)]).context();
        let materials = read_material_table(&mut ctx).unwrap();
        assert_eq!(materials.primary_texture(0), Some(4));
        assert_eq!(ctx.diagnostics().len(), 1);
        assert_eq!(ctx.diagnostics()[0].chunk, "UMTL");
    }

    #[test]
    fn test_unsupported_revision() {
        let mut b = Bytes::new();
        b.raw(b"LTMU").u32(0x93).u32(0);
        let err = read_material_table(&mut b.context()).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedVersion {
                chunk: "UMTL",
                version: 0x93
            }
        ));
    }

    #[test]
    fn test_layout_table() {
        assert!(!MaterialLayout::for_version(0x94).unwrap().has_extra_field);
        assert_eq!(MaterialLayout::for_version(0x96).unwrap().trailing_len, 16);
        assert!(MaterialLayout::for_version(0x97).is_none());
    }
}
