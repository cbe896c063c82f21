//! Texture record dump.

use std::fs;
use std::path::{Path, PathBuf};

use super::ProgressCallback;
use crate::error::Result;
use crate::scene::SceneModel;

/// File name a texture slot is written under.
#[must_use]
pub fn texture_file_name(slot: u32) -> String {
    format!("texture_{slot}.dds")
}

/// Write every texture record to `dir` as a standalone `.dds` file.
///
/// Records already carry their DDS header, so they are written unchanged.
/// Returns the written paths in slot order.
pub fn export_textures(scene: &SceneModel, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    export_textures_with_progress(scene, dir, &|_| {})
}

/// [`export_textures`], reporting each written file to `progress`.
pub fn export_textures_with_progress(
    scene: &SceneModel,
    dir: impl AsRef<Path>,
    progress: ProgressCallback,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(scene.textures().len());
    for blob in scene.textures().values() {
        let path = dir.join(texture_file_name(blob.slot));
        fs::write(&path, &blob.data)?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), blob.data.len());
        progress(&path.to_string_lossy());
        written.push(path);
    }
    Ok(written)
}
