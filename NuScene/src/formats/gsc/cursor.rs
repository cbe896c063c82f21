//! Positional, endianness-aware reader over an in-memory container.

use byteorder::{BigEndian, ByteOrder, LittleEndian};
use half::f16;

use crate::error::{Error, Result};

/// Byte order used for multi-byte reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

/// Generates a typed reader that honours the cursor's active byte order.
macro_rules! typed_read {
    ($(#[$meta:meta])* $name:ident, $ty:ty, $size:expr, $read:ident) => {
        $(#[$meta])*
        pub fn $name(&mut self) -> Result<$ty> {
            let endian = self.endian;
            let bytes = self.read_bytes($size)?;
            Ok(match endian {
                Endian::Big => BigEndian::$read(bytes),
                Endian::Little => LittleEndian::$read(bytes),
            })
        }
    };
}

/// Binary reader over the bytes of one container file.
///
/// The position always stays within `0..=len`; any read or seek past the end
/// fails with [`Error::UnexpectedEof`] and leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct ByteCursor {
    data: Vec<u8>,
    pos: usize,
    endian: Endian,
}

impl ByteCursor {
    #[must_use]
    pub fn new(data: Vec<u8>, endian: Endian) -> Self {
        Self {
            data,
            pos: 0,
            endian,
        }
    }

    /// Total length of the underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Current absolute read position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[must_use]
    pub fn endian(&self) -> Endian {
        self.endian
    }

    /// Switch the byte order, returning the previous one.
    pub fn set_endian(&mut self, endian: Endian) -> Endian {
        std::mem::replace(&mut self.endian, endian)
    }

    /// Move to an absolute position.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::UnexpectedEof {
                position: self.pos,
                wanted: pos.saturating_sub(self.pos),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Move forward by `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        let target = self.pos.checked_add(n).ok_or(Error::UnexpectedEof {
            position: self.pos,
            wanted: n,
        })?;
        self.seek(target)
    }

    /// Read `n` raw bytes, advancing the position.
    pub fn read_bytes(&mut self, n: usize) -> Result<&[u8]> {
        if n > self.remaining() {
            return Err(Error::UnexpectedEof {
                position: self.pos,
                wanted: n,
            });
        }
        let start = self.pos;
        self.pos += n;
        Ok(&self.data[start..self.pos])
    }

    /// Single bytes are never byte-swapped.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    typed_read!(read_u16, u16, 2, read_u16);
    typed_read!(read_i16, i16, 2, read_i16);
    typed_read!(
        /// Read a 32-bit unsigned integer in the active byte order.
        read_u32, u32, 4, read_u32
    );
    typed_read!(read_i32, i32, 4, read_i32);
    typed_read!(read_f32, f32, 4, read_f32);

    /// Read an IEEE 754 half-precision float and widen it.
    pub fn read_f16(&mut self) -> Result<f32> {
        Ok(f16::from_bits(self.read_u16()?).to_f32())
    }

    /// Read a `u32` length followed by that many bytes of (lossy) UTF-8.
    pub fn read_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Find the first occurrence of `needle`, scanning from offset 0.
    ///
    /// The read position is left untouched. A match at offset 0 is a normal
    /// hit; absence is reported as [`Error::PatternNotFound`].
    pub fn find(&self, needle: &[u8]) -> Result<usize> {
        if !needle.is_empty() {
            if let Some(offset) = self
                .data
                .windows(needle.len())
                .position(|window| window == needle)
            {
                return Ok(offset);
            }
        }
        Err(Error::PatternNotFound {
            pattern: String::from_utf8_lossy(needle).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_honour_endianness() {
        let bytes = vec![0x12, 0x34, 0x56, 0x78, 0x12, 0x34, 0x56, 0x78];
        let mut cursor = ByteCursor::new(bytes, Endian::Big);
        assert_eq!(cursor.read_u32().unwrap(), 0x1234_5678);
        cursor.set_endian(Endian::Little);
        assert_eq!(cursor.read_u32().unwrap(), 0x7856_3412);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_single_byte_never_swaps() {
        let mut cursor = ByteCursor::new(vec![0xAB, 0xCD], Endian::Big);
        assert_eq!(cursor.read_u8().unwrap(), 0xAB);
        cursor.set_endian(Endian::Little);
        assert_eq!(cursor.read_u8().unwrap(), 0xCD);
    }

    #[test]
    fn test_half_and_float() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&0x3C00u16.to_be_bytes()); // 1.0 as f16
        bytes.extend_from_slice(&2.5f32.to_be_bytes());
        let mut cursor = ByteCursor::new(bytes, Endian::Big);
        assert!((cursor.read_f16().unwrap() - 1.0).abs() < f32::EPSILON);
        assert!((cursor.read_f32().unwrap() - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_read_past_end_fails_without_moving() {
        let mut cursor = ByteCursor::new(vec![1, 2, 3], Endian::Big);
        cursor.skip(1).unwrap();
        let err = cursor.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                position: 1,
                wanted: 4
            }
        ));
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_seek_bounds() {
        let mut cursor = ByteCursor::new(vec![0; 8], Endian::Big);
        cursor.seek(8).unwrap();
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.seek(9).is_err());
        assert!(cursor.skip(usize::MAX).is_err());
        assert_eq!(cursor.position(), 8);
    }

    #[test]
    fn test_find_restores_position_and_reports_zero() {
        let mut cursor = ByteCursor::new(b"HSEMxxHSEM".to_vec(), Endian::Big);
        cursor.skip(5).unwrap();
        assert_eq!(cursor.find(b"HSEM").unwrap(), 0);
        assert_eq!(cursor.find(b"xH").unwrap(), 5);
        assert_eq!(cursor.position(), 5);
        assert!(matches!(
            cursor.find(b"PSID"),
            Err(Error::PatternNotFound { .. })
        ));
    }

    #[test]
    fn test_prefixed_string() {
        let mut bytes = 3u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"abc");
        let mut cursor = ByteCursor::new(bytes, Endian::Big);
        assert_eq!(cursor.read_prefixed_string().unwrap(), "abc");
    }
}
