//! TXGH texture directory reader.
//!
//! Layout (big-endian, offsets from the tag):
//!
//! - `+4`, `+8`: unused words
//! - `+12`: declared texture count, followed by one `u32` per declared
//!   texture and one unused `u32`
//! - entry count, then per entry: 16-byte prefix, `u32` name length, name,
//!   4 trailing bytes
//! - unused `u32`, then the trailing object count that feeds the id counter

use super::chunk::{self, ChunkTag};
use super::context::ParseContext;
use crate::error::Result;

const ENTRY_PREFIX_LEN: usize = 16;
const ENTRY_TRAILER_LEN: usize = 2 + 1 + 1;

/// Texture directory summary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureDirectory {
    /// Count declared at the head of the chunk.
    pub declared_count: u32,
    /// Number of entries actually listed.
    pub total_count: u32,
    /// Entries with a non-empty name; the authoritative texture count.
    pub good_count: u32,
    /// Names of the good entries, in file order.
    pub names: Vec<String>,
}

/// Read the TXGH chunk, advancing the id counter for every named entry and
/// for the footer's trailing object count.
pub fn read_texture_directory(ctx: &mut ParseContext) -> Result<TextureDirectory> {
    chunk::enter(&mut ctx.cursor, ChunkTag::Txgh)?;
    let cursor = &mut ctx.cursor;

    cursor.skip(4 + 4)?;
    let declared_count = cursor.read_u32()?;
    cursor.skip(declared_count as usize * 4 + 4)?;

    let total_count = cursor.read_u32()?;
    let mut names = Vec::new();
    for _ in 0..total_count {
        cursor.skip(ENTRY_PREFIX_LEN)?;
        let name = cursor.read_prefixed_string()?;
        cursor.skip(ENTRY_TRAILER_LEN)?;
        if !name.is_empty() {
            names.push(name);
        }
    }

    cursor.skip(4)?;
    let trailing_count = cursor.read_u32()?;

    let good_count = names.len() as u32;
    ctx.ids.advance(good_count);
    ctx.ids.advance(trailing_count);

    tracing::debug!(
        "TXGH: {declared_count} declared, {total_count} listed, {good_count} named, {trailing_count} trailing"
    );
    for name in &names {
        tracing::debug!("TXGH: texture {name}");
    }

    Ok(TextureDirectory {
        declared_count,
        total_count,
        good_count,
        names,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gsc::resource_id::ResourceId;
    use crate::formats::gsc::test_support::Bytes;

    fn directory(names: &[&str], trailing: u32) -> Bytes {
        let mut b = Bytes::new();
        b.raw(b"junk").raw(b"HGXT").u32(1).u32(0);
        b.u32(2).u32(0).u32(1).u32(0);
        b.u32(names.len() as u32);
        for name in names {
            b.zeros(ENTRY_PREFIX_LEN).string(name).zeros(ENTRY_TRAILER_LEN);
        }
        b.u32(0).u32(trailing);
        b
    }

    #[test]
    fn test_counts_named_entries() {
        let mut ctx = directory(&["rock.tga", "", "grass.tga"], 0).context();
        let dir = read_texture_directory(&mut ctx).unwrap();
        assert_eq!(dir.declared_count, 2);
        assert_eq!(dir.total_count, 3);
        assert_eq!(dir.good_count, 2);
        assert_eq!(dir.names, vec!["rock.tga", "grass.tga"]);
        assert!(dir.good_count <= dir.total_count);
    }

    #[test]
    fn test_advances_id_counter() {
        let mut ctx = directory(&["a", "b", ""], 4).context();
        read_texture_directory(&mut ctx).unwrap();
        assert_eq!(ctx.ids.peek(), ResourceId(7 + 2 + 4));
    }

    #[test]
    fn test_truncated_directory() {
        let bytes = directory(&["a"], 0).build();
        let mut ctx = Bytes::new().raw(&bytes[..bytes.len() - 6]).context();
        assert!(matches!(
            read_texture_directory(&mut ctx),
            Err(crate::Error::UnexpectedEof { .. })
        ));
    }
}
