//! Synthetic `.gsc` containers for integration tests.

#![allow(dead_code)]

use byteorder::{BigEndian, LittleEndian, WriteBytesExt};
use half::f16;
use nuscene::formats::gsc::{TextureFormat, record_len};

pub const DXT1: u32 = u32::from_le_bytes(*b"DXT1");
pub const DXT5: u32 = u32::from_le_bytes(*b"DXT5");

/// Big-endian byte writer.
#[derive(Default)]
pub struct Writer(pub Vec<u8>);

impl Writer {
    pub fn u8(&mut self, v: u8) -> &mut Self {
        self.0.push(v);
        self
    }

    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.0.write_u16::<BigEndian>(v).unwrap();
        self
    }

    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.0.write_i16::<BigEndian>(v).unwrap();
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

    pub fn half(&mut self, v: f32) -> &mut Self {
        self.u16(f16::from_f32(v).to_bits())
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

    pub fn string(&mut self, s: &str) -> &mut Self {
        self.u32(s.len() as u32).raw(s.as_bytes())
    }
}

/// A texture record to place in the texture region.
#[derive(Clone, Copy)]
pub struct TextureSpec {
    pub tag: u32,
    pub width: u32,
    pub height: u32,
    pub mips: u32,
}

/// Layout of the synthetic scene:
///
/// - TXGH: `rock.tga`, an unnamed entry, `grass.tga`; one trailing object
///   (ids 7..=9 consumed, first buffer gets 10)
/// - DISP: part 0 -> material 1, part 2 -> material 0, part 1 unassigned
/// - UMTL (0x96): `stone` -> texture 0, `moss` -> texture 1
/// - MESH: part 0 introduces vertex buffer 10 (a quad) and index buffer 11;
///   part 1 reuses 10, introduces index buffer 13 and carries a skin map;
///   part 2 reuses both 10 and 11
pub struct GscBuilder {
    pub textures: Vec<TextureSpec>,
    pub include_mesh: bool,
}

impl Default for GscBuilder {
    fn default() -> Self {
        Self {
            textures: vec![
                TextureSpec {
                    tag: DXT1,
                    width: 8,
                    height: 8,
                    mips: 2,
                },
                TextureSpec {
                    tag: DXT5,
                    width: 4,
                    height: 4,
                    mips: 1,
                },
            ],
            include_mesh: true,
        }
    }
}

/// Quad corners, in vertex buffer order.
pub const QUAD: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]];

impl GscBuilder {
    pub fn build(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.raw(b"GSC0").zeros(12);
        texture_directory(&mut w);
        display_list(&mut w);
        material_table(&mut w);
        for texture in &self.textures {
            texture_record(&mut w, *texture);
        }
        if self.include_mesh {
            meshes(&mut w);
        }
        w.0
    }
}

fn texture_directory(w: &mut Writer) {
    w.raw(b"HGXT").u32(0).u32(0);
    w.u32(3).u32(0).u32(1).u32(2).u32(0);
    w.u32(3);
    for name in ["rock.tga", "", "grass.tga"] {
        w.zeros(16).string(name).zeros(4);
    }
    w.u32(0).u32(1);
}

fn display_list(w: &mut Writer) {
    w.raw(b"PSID").u32(15).string("levels/test.gsc");
    w.u32(3);
    for instance in [0u32, 1, 2] {
        w.u8(1).u8(0).u32(instance);
    }
    w.u32(1);
    w.u32(2).u32(1).u32(0);
    w.u32(2).u32(0).u32(2);
}

fn material(w: &mut Writer, name: &str, texture: i16) {
    w.zeros(0x50).i16(texture);
    for _ in 1..18 {
        w.i16(-1);
    }
    w.u32(0);
    w.zeros(0x24).u16(0).string(name);
    w.zeros(0x40).u32(0).u32(0);
    w.i16(texture).zeros(16);
}

fn material_table(w: &mut Writer) {
    w.raw(b"LTMU").u32(0x96).u32(2);
    material(w, "stone", 0);
    material(w, "moss", 1);
}

fn texture_record(w: &mut Writer, spec: TextureSpec) {
    let format = match spec.tag {
        DXT1 => Some(TextureFormat::Bc1),
        DXT5 => Some(TextureFormat::Bc3),
        21 => Some(TextureFormat::Rgba32),
        _ => None,
    };
    let len = format.map_or(192, |f| record_len(f, spec.width, spec.height, spec.mips, false));

    w.raw(b"DDS ").u32_le(124).u32_le(0);
    w.u32_le(spec.height).u32_le(spec.width);
    w.zeros(8).u32_le(spec.mips);
    w.zeros(84 - 32).u32_le(spec.tag);
    w.zeros(112 - 88).u32_le(0);
    w.zeros(128 - 116);
    w.zeros(len as usize - 128);
}

fn quad_vertices(w: &mut Writer) {
    w.u32(0x8000_0000).u32(0).u32(4).u32(4);
    w.u8(0).u8(3).u8(0);
    w.u8(1).u8(8).u8(12);
    w.u8(2).u8(9).u8(16);
    w.u8(5).u8(5).u8(20);
    for (i, [x, y]) in QUAD.iter().enumerate() {
        w.f32(*x).f32(*y).f32(0.0);
        w.u8(127).u8(127).u8(255).u8(0);
        w.u8(i as u8 * 10).u8(20).u8(30).u8(255);
        w.half(*x).half(*y);
    }
    w.u32(0);
}

fn fresh_indices(w: &mut Writer, indices: &[u16]) {
    w.u32(0x8000_0000).u32(0).u32(indices.len() as u32).u32(2);
    for i in indices {
        w.u16(*i);
    }
}

fn ranges(w: &mut Writer, index: (u32, u32), vertex: (u32, u32)) {
    w.u32(index.0).u32(index.1).u32(vertex.0).u16(0).u32(vertex.1);
}

fn trailer(w: &mut Writer, skin_len: usize) {
    w.u32(0).u32(skin_len as u32).zeros(skin_len);
    w.u32(0);
    w.zeros(44).u32(0).zeros(8).u32(0).zeros(12);
}

fn meshes(w: &mut Writer) {
    w.raw(b"HSEM").u32(0x30).u32(0).u32(3);

    w.u32(1);
    quad_vertices(w);
    w.u32(0);
    fresh_indices(w, &[0, 1, 2, 2, 1, 3]);
    ranges(w, (0, 6), (0, 4));
    trailer(w, 0);

    w.u32(1).u32(0xC000_000A).zeros(8);
    w.u32(0);
    fresh_indices(w, &[0, 1, 2]);
    ranges(w, (0, 3), (1, 3));
    trailer(w, 16);

    w.u32(2).u32(0xC000_000A).zeros(8).u32(0);
    w.u32(0);
    w.u32(0xC000_000B).zeros(4);
    ranges(w, (3, 3), (0, 4));
    trailer(w, 0);
}
