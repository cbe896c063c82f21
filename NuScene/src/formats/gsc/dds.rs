//! Texture region reader.
//!
//! Textures are stored back to back as DDS records (128-byte header followed
//! by pixel data) in little-endian order. Record lengths are not stored, so
//! each one is derived from the header's format, dimensions and mip count.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::context::ParseContext;
use super::cursor::{ByteCursor, Endian};
use crate::error::{Error, Result};

/// Magic at the start of the first texture record.
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Size of a record header, included in every record length.
pub const DDS_HEADER_LEN: u64 = 128;

pub const FOURCC_DXT1: u32 = u32::from_le_bytes(*b"DXT1");
pub const FOURCC_DXT5: u32 = u32::from_le_bytes(*b"DXT5");
/// `D3DFMT_A8R8G8B8`
pub const D3DFMT_A8R8G8B8: u32 = 21;

// Header field offsets, relative to the record start
const HEIGHT_OFFSET: usize = 12;
const WIDTH_OFFSET: usize = 16;
const MIP_COUNT_OFFSET: usize = 28;
const FORMAT_OFFSET: usize = 84;
const CUBEMAP_OFFSET: usize = 112;

const CUBE_FACES: u64 = 6;
/// Shifting a `u32` dimension this far always yields zero.
const MAX_SHIFT: u32 = 32;

/// Pixel formats found in the texture region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextureFormat {
    /// DXT1 block compression, 4 bits per texel.
    Bc1,
    /// DXT5 block compression, 8 bits per texel.
    Bc3,
    /// Uncompressed, single mip only.
    Rgba32,
}

impl TextureFormat {
    #[must_use]
    pub fn from_tag(tag: u32) -> Option<Self> {
        match tag {
            FOURCC_DXT1 => Some(Self::Bc1),
            FOURCC_DXT5 => Some(Self::Bc3),
            D3DFMT_A8R8G8B8 => Some(Self::Rgba32),
            _ => None,
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bc1 => "BC1",
            Self::Bc3 => "BC3",
            Self::Rgba32 => "RGBA32",
        })
    }
}

/// Fields of a record header that drive its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHeader {
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub format_tag: u32,
    pub cubemap: bool,
}

/// Raw bytes of one texture slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureBlob {
    /// Index of the texture in the directory's good-entry order.
    pub slot: u32,
    pub format: TextureFormat,
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub cubemap: bool,
    /// The full record: DDS header followed by pixel data.
    pub data: Vec<u8>,
}

impl TextureBlob {
    /// Pixel data without the record header.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.data.get(DDS_HEADER_LEN as usize..).unwrap_or_default()
    }
}

/// Block-compressed size of one mip level, in bytes.
fn block_level_len(format: TextureFormat, width: u32, height: u32, level: u32) -> u64 {
    let w = u64::from(width.checked_shr(level).unwrap_or(0).max(4));
    let h = u64::from(height.checked_shr(level).unwrap_or(0).max(4));
    match format {
        TextureFormat::Bc1 => w * h / 2,
        _ => w * h,
    }
}

/// Length in bytes of a texture record, header included.
///
/// Pure arithmetic over the header fields; no bytes are read.
#[must_use]
pub fn record_len(
    format: TextureFormat,
    width: u32,
    height: u32,
    mip_count: u32,
    cubemap: bool,
) -> u64 {
    match format {
        TextureFormat::Bc1 | TextureFormat::Bc3 => {
            let shifted_levels = mip_count.min(MAX_SHIFT);
            let mut payload = (0..shifted_levels)
                .map(|level| block_level_len(format, width, height, level))
                .fold(0u64, u64::saturating_add);
            payload = payload.saturating_add(
                u64::from(mip_count - shifted_levels)
                    * block_level_len(format, width, height, MAX_SHIFT),
            );
            if cubemap {
                payload = payload.saturating_mul(CUBE_FACES);
            }
            payload.saturating_add(DDS_HEADER_LEN)
        }
        TextureFormat::Rgba32 => (u64::from(width) * u64::from(height))
            .saturating_mul(16)
            .saturating_add(DDS_HEADER_LEN),
    }
}

fn read_record_header(cursor: &mut ByteCursor, start: usize) -> Result<RecordHeader> {
    let mut field = |offset: usize| -> Result<u32> {
        cursor.seek(start + offset)?;
        cursor.read_u32()
    };
    let header = RecordHeader {
        height: field(HEIGHT_OFFSET)?,
        width: field(WIDTH_OFFSET)?,
        mip_count: field(MIP_COUNT_OFFSET)?,
        format_tag: field(FORMAT_OFFSET)?,
        cubemap: field(CUBEMAP_OFFSET)? != 0,
    };
    cursor.seek(start)?;
    Ok(header)
}

fn read_records(ctx: &mut ParseContext, count: u32) -> Result<BTreeMap<u32, TextureBlob>> {
    let mut blobs = BTreeMap::new();

    for slot in 0..count {
        let start = ctx.cursor.position();
        let header = read_record_header(&mut ctx.cursor, start)?;

        let Some(format) = TextureFormat::from_tag(header.format_tag) else {
            if ctx.options.strict_textures {
                return Err(Error::UnsupportedFormat {
                    tag: header.format_tag,
                });
            }
            // Length 0: the record is not consumed.
            ctx.diagnose(
                "DDS",
                format!(
                    "texture {slot} at 0x{start:08X}: unknown format tag 0x{:08X}, skipped",
                    header.format_tag
                ),
            );
            continue;
        };

        let len = record_len(
            format,
            header.width,
            header.height,
            header.mip_count,
            header.cubemap,
        );
        let len = usize::try_from(len).map_err(|_| Error::UnexpectedEof {
            position: start,
            wanted: usize::MAX,
        })?;
        let data = ctx.cursor.read_bytes(len)?.to_vec();

        if format == TextureFormat::Rgba32 && header.mip_count != 1 {
            ctx.diagnose(
                "DDS",
                format!(
                    "texture {slot}: uncompressed texture with {} mips skipped",
                    header.mip_count
                ),
            );
            continue;
        }

        tracing::debug!(
            "DDS: texture {slot} {format} {}x{} mips={} cube={} len={len}",
            header.width,
            header.height,
            header.mip_count,
            header.cubemap
        );
        blobs.insert(
            slot,
            TextureBlob {
                slot,
                format,
                width: header.width,
                height: header.height,
                mip_count: header.mip_count,
                cubemap: header.cubemap,
                data,
            },
        );
    }

    Ok(blobs)
}

/// Extract `count` texture records, starting at the first `DDS ` magic.
///
/// The cursor is switched to little-endian for the region and restored
/// afterwards, also on failure.
pub fn read_texture_blobs(ctx: &mut ParseContext, count: u32) -> Result<BTreeMap<u32, TextureBlob>> {
    if count == 0 || ctx.options.skip_textures {
        return Ok(BTreeMap::new());
    }

    let start = ctx
        .cursor
        .find(DDS_MAGIC)
        .map_err(|_| Error::ChunkNotFound {
            tag: String::from_utf8_lossy(DDS_MAGIC).into_owned(),
        })?;
    tracing::debug!("DDS: first texture at 0x{start:08X}, {count} expected");
    ctx.cursor.seek(start)?;

    let previous = ctx.cursor.set_endian(Endian::Little);
    let blobs = read_records(ctx, count);
    ctx.cursor.set_endian(previous);
    blobs
}
