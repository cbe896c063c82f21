//! Chunk tags and content-scan location.
//!
//! Structural chunks are not listed in any directory; each one is found by
//! scanning the file for its 4-byte tag. The container was written
//! big-endian, so the tags appear byte-reversed on disk (`MESH` is stored as
//! `HSEM`).

use std::fmt;

use super::cursor::ByteCursor;
use crate::error::{Error, Result};

/// Structural chunks of a `.gsc` container, in processing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// Texture directory
    Txgh,
    /// Display commands (mesh part -> material)
    Disp,
    /// Material table
    Umtl,
    /// Mesh parts and their buffers
    Mesh,
}

impl ChunkTag {
    /// The chunk name as written in documentation and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Txgh => "TXGH",
            Self::Disp => "DISP",
            Self::Umtl => "UMTL",
            Self::Mesh => "MESH",
        }
    }

    /// The tag bytes as they are stored in the file.
    #[must_use]
    pub fn stored(self) -> [u8; 4] {
        let mut tag = [0u8; 4];
        tag.copy_from_slice(self.name().as_bytes());
        tag.reverse();
        tag
    }
}

impl fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Absolute offset of the chunk's tag.
pub fn locate(cursor: &ByteCursor, tag: ChunkTag) -> Result<usize> {
    cursor
        .find(&tag.stored())
        .map_err(|_| Error::ChunkNotFound {
            tag: tag.name().to_string(),
        })
}

/// Locate a chunk, seek to it and consume its tag.
///
/// Returns the chunk's start offset.
pub fn enter(cursor: &mut ByteCursor, tag: ChunkTag) -> Result<usize> {
    let offset = locate(cursor, tag)?;
    tracing::debug!("{tag}: found at 0x{offset:08X}");
    cursor.seek(offset)?;
    cursor.skip(4)?;
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gsc::cursor::Endian;

    #[test]
    fn test_stored_tags_are_reversed() {
        assert_eq!(&ChunkTag::Mesh.stored(), b"HSEM");
        assert_eq!(&ChunkTag::Txgh.stored(), b"HGXT");
        assert_eq!(&ChunkTag::Disp.stored(), b"PSID");
        assert_eq!(&ChunkTag::Umtl.stored(), b"LTMU");
    }

    #[test]
    fn test_enter_skips_tag() {
        let mut cursor = ByteCursor::new(b"....PSID\x00\x00\x00\x0F".to_vec(), Endian::Big);
        assert_eq!(enter(&mut cursor, ChunkTag::Disp).unwrap(), 4);
        assert_eq!(cursor.read_u32().unwrap(), 15);
    }

    #[test]
    fn test_chunk_at_offset_zero_is_found() {
        let cursor = ByteCursor::new(b"HGXT".to_vec(), Endian::Big);
        assert_eq!(locate(&cursor, ChunkTag::Txgh).unwrap(), 0);
    }

    #[test]
    fn test_missing_chunk() {
        let cursor = ByteCursor::new(b"MESH".to_vec(), Endian::Big);
        let err = locate(&cursor, ChunkTag::Mesh).unwrap_err();
        assert!(matches!(err, Error::ChunkNotFound { ref tag } if tag == "MESH"));
    }
}
