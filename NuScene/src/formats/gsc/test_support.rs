//! Byte-stream builder for reader unit tests.

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};

use super::context::ParseContext;
use crate::options::DecodeOptions;

/// Big-endian writer with a few little-endian escapes for texture records.
#[derive(Debug, Default)]
pub(crate) struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.0.push(v);
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.0.write_i16::<BigEndian>(v).unwrap();
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.0.write_u16::<BigEndian>(v).unwrap();
        self
    }

    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.0.write_u32::<BigEndian>(v).unwrap();
        self
    }

    pub fn f32(&mut self, v: f32) -> &mut Self {
        self.0.write_f32::<BigEndian>(v).unwrap();
        self
    }

    pub fn u32_le(&mut self, v: u32) -> &mut Self {
        self.0.write_u32::<LittleEndian>(v).unwrap();
        self
    }

    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.extend_from_slice(bytes);
        self
    }

    pub fn zeros(&mut self, n: usize) -> &mut Self {
        self.0.resize(self.0.len() + n, 0);
        self
    }

    /// `u32` length followed by the string bytes.
    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u32(s.len() as u32).raw(s.as_bytes())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn build(&self) -> Vec<u8> {
        self.0.clone()
    }

    pub fn context(&self) -> ParseContext {
        ParseContext::new(self.build(), DecodeOptions::new())
    }
}
