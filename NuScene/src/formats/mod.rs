//! Binary format readers.

pub mod gsc;

pub use gsc::{ByteCursor, ChunkTag, Endian, ResourceId};
