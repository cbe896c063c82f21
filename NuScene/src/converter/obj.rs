//! Wavefront OBJ export.
//!
//! Every mesh part becomes one `o part_<ordinal>` object. Part indices are
//! relative to the part's vertex window and are emitted as triangle lists.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::scene::SceneModel;

/// Write `scene` as OBJ text.
///
/// Parts whose windows do not fit their buffers are left out, as are
/// triangles referencing vertices outside the part's window.
pub fn write_obj<W: Write>(scene: &SceneModel, mut writer: W) -> Result<()> {
    writeln!(writer, "# nuscene {}", crate::VERSION)?;

    // OBJ indices are 1-based and global across objects.
    let mut base = 1usize;
    for part in scene.parts() {
        let (Some(vertices), Some(indices)) = (scene.part_vertices(part), scene.part_indices(part))
        else {
            tracing::warn!("OBJ: part {} skipped, sub-range out of bounds", part.ordinal);
            continue;
        };

        writeln!(writer, "o part_{}", part.ordinal)?;
        if let Some(texture) = part.texture {
            writeln!(writer, "# texture {texture}")?;
        }
        for v in vertices {
            writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
        }
        for v in vertices {
            writeln!(writer, "vt {} {}", v.uv.x, 1.0 - v.uv.y)?;
        }
        for v in vertices {
            writeln!(writer, "vn {} {} {}", v.normal.x, v.normal.y, v.normal.z)?;
        }

        let mut dropped = 0usize;
        for triangle in indices.chunks_exact(3) {
            if triangle.iter().any(|i| usize::from(*i) >= vertices.len()) {
                dropped += 1;
                continue;
            }
            let [a, b, c] = [0, 1, 2].map(|k| base + usize::from(triangle[k]));
            writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
        }
        if dropped > 0 {
            tracing::warn!("OBJ: part {}: {dropped} triangles out of range", part.ordinal);
        }

        base += vertices.len();
    }

    writer.flush()?;
    Ok(())
}

/// Write `scene` to an OBJ file at `path`.
pub fn export_obj(scene: &SceneModel, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_obj(scene, BufWriter::new(file))?;
    tracing::info!("Wrote {}", path.display());
    Ok(())
}
