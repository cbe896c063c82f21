//! Vertex attribute descriptors and element decoding.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::error::Result;
use crate::formats::gsc::cursor::ByteCursor;

const MINI_FLOAT_STEP: f64 = 1.0 / 127.0;

/// What a vertex attribute means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum AttributeSemantic {
    Position = 0,
    Normal = 1,
    ColorSet0 = 2,
    Tangent = 3,
    ColorSet1 = 4,
    UvSet1 = 5,
    Unknown = 6,
    UvSet2 = 7,
    Unknown2 = 8,
    BlendIndices = 9,
    BlendWeight = 10,
    Unknown3 = 11,
    LightDirSet = 12,
    LightColSet = 13,
}

impl AttributeSemantic {
    #[must_use]
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            0 => Self::Position,
            1 => Self::Normal,
            2 => Self::ColorSet0,
            3 => Self::Tangent,
            4 => Self::ColorSet1,
            5 => Self::UvSet1,
            6 => Self::Unknown,
            7 => Self::UvSet2,
            8 => Self::Unknown2,
            9 => Self::BlendIndices,
            10 => Self::BlendWeight,
            11 => Self::Unknown3,
            12 => Self::LightDirSet,
            13 => Self::LightColSet,
            _ => return None,
        })
    }
}

/// How a vertex attribute is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum StorageFormat {
    Vec2f = 2,
    Vec3f = 3,
    Vec4f = 4,
    Vec2Half = 5,
    Vec4Half = 6,
    Vec4Char = 7,
    /// Four bytes, each mapped onto `[-1, 1]`.
    Vec4Mini = 8,
    Col4Char = 9,
}

impl StorageFormat {
    #[must_use]
    pub fn from_u8(v: u8) -> Option<Self> {
        Some(match v {
            2 => Self::Vec2f,
            3 => Self::Vec3f,
            4 => Self::Vec4f,
            5 => Self::Vec2Half,
            6 => Self::Vec4Half,
            7 => Self::Vec4Char,
            8 => Self::Vec4Mini,
            9 => Self::Col4Char,
            _ => return None,
        })
    }
}

/// Bytes occupied by an attribute, keyed on the raw storage format only.
#[must_use]
pub fn storage_size(raw: u8) -> usize {
    match raw {
        0..=4 => usize::from(raw) * 4,
        6 => 8,
        _ => 4,
    }
}

/// Map a normalized byte onto `[-1, 1]`.
#[must_use]
pub fn mini_float(value: u8) -> f32 {
    match value {
        127 => 0.0,
        255 => 1.0,
        _ => (-1.0 + f64::from(value) * MINI_FLOAT_STEP) as f32,
    }
}

/// A decoded vertex; attributes missing from the layout keep their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub color: [u8; 4],
    pub uv: Vec2,
}

impl Default for Vertex {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            normal: Vec3::ZERO,
            color: [255; 4],
            uv: Vec2::ZERO,
        }
    }
}

/// One entry of a vertex buffer's attribute list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    pub semantic: u8,
    pub storage: u8,
}

/// Per-attribute decode step, resolved once per buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttributeDecode {
    Position3f,
    PositionHalf4,
    NormalMini4,
    Color4,
    UvHalf2,
    UvHalf4,
    Skip(usize),
}

impl VertexAttribute {
    pub(crate) fn plan(self) -> AttributeDecode {
        use AttributeSemantic as S;
        use StorageFormat as F;

        let semantic = AttributeSemantic::from_u8(self.semantic);
        let storage = StorageFormat::from_u8(self.storage);
        match (semantic, storage) {
            (Some(S::Position), Some(F::Vec3f)) => AttributeDecode::Position3f,
            (Some(S::Position), Some(F::Vec4Half)) => AttributeDecode::PositionHalf4,
            (Some(S::Normal), Some(F::Vec4Mini)) => AttributeDecode::NormalMini4,
            (Some(S::ColorSet0), Some(F::Col4Char)) => AttributeDecode::Color4,
            (Some(S::UvSet1), Some(F::Vec2Half)) => AttributeDecode::UvHalf2,
            (Some(S::UvSet1), Some(F::Vec4Half)) => AttributeDecode::UvHalf4,
            _ => AttributeDecode::Skip(storage_size(self.storage)),
        }
    }

    /// Whether the decoder would have used this attribute had its storage
    /// format been supported.
    pub(crate) fn is_consumed_semantic(self) -> bool {
        matches!(
            AttributeSemantic::from_u8(self.semantic),
            Some(
                AttributeSemantic::Position
                    | AttributeSemantic::Normal
                    | AttributeSemantic::ColorSet0
                    | AttributeSemantic::UvSet1
            )
        )
    }
}

impl AttributeDecode {
    /// Bytes this step consumes per vertex.
    pub(crate) fn byte_len(self) -> usize {
        match self {
            Self::Position3f => 12,
            Self::PositionHalf4 | Self::UvHalf4 => 8,
            Self::NormalMini4 | Self::Color4 | Self::UvHalf2 => 4,
            Self::Skip(len) => len,
        }
    }

    pub(crate) fn apply(self, cursor: &mut ByteCursor, vertex: &mut Vertex) -> Result<()> {
        match self {
            Self::Position3f => {
                vertex.position = Vec3::new(cursor.read_f32()?, cursor.read_f32()?, cursor.read_f32()?);
            }
            Self::PositionHalf4 => {
                vertex.position = Vec3::new(cursor.read_f16()?, cursor.read_f16()?, cursor.read_f16()?);
                cursor.skip(2)?;
            }
            Self::NormalMini4 => {
                let x = mini_float(cursor.read_u8()?);
                let y = mini_float(cursor.read_u8()?);
                let z = mini_float(cursor.read_u8()?);
                cursor.skip(1)?;
                vertex.normal = Vec3::new(x, y, z);
            }
            Self::Color4 => {
                for channel in &mut vertex.color {
                    *channel = cursor.read_u8()?;
                }
            }
            Self::UvHalf2 => {
                vertex.uv = Vec2::new(cursor.read_f16()?, cursor.read_f16()?);
            }
            Self::UvHalf4 => {
                vertex.uv = Vec2::new(cursor.read_f16()?, cursor.read_f16()?);
                cursor.skip(4)?;
            }
            Self::Skip(len) => cursor.skip(len)?,
        }
        Ok(())
    }
}
