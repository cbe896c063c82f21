//! Scene assembly: run the chunk readers in order and resolve textures.

use std::path::Path;

use super::SceneModel;
use crate::error::Result;
use crate::formats::gsc::{
    DisplayList, MaterialTable, MeshPart, ParseContext, read_display_list, read_material_table,
    read_meshes, read_texture_blobs, read_texture_directory,
};
use crate::options::DecodeOptions;

/// Attach the display list's material and that material's texture.
fn resolve_materials(
    ctx: &mut ParseContext,
    parts: &mut [MeshPart],
    display: &DisplayList,
    materials: &MaterialTable,
) {
    for part in parts {
        part.material = display.material_for(part.ordinal);
        let Some(material) = part.material else {
            continue;
        };
        if material as usize >= materials.materials.len() {
            ctx.diagnose(
                "DISP",
                format!(
                    "part {} uses material {material} of {}",
                    part.ordinal,
                    materials.materials.len()
                ),
            );
        }
        part.texture = materials.primary_texture(material);
    }
}

/// Decode a whole `.gsc` container held in memory.
///
/// Chunks are read in the fixed order TXGH, DISP, UMTL, texture region,
/// MESH; any error aborts the load.
pub fn decode_scene(data: Vec<u8>, options: &DecodeOptions) -> Result<SceneModel> {
    let mut ctx = ParseContext::new(data, options.clone());

    let directory = read_texture_directory(&mut ctx)?;
    let display = read_display_list(&mut ctx)?;
    let materials = read_material_table(&mut ctx)?;
    let textures = read_texture_blobs(&mut ctx, directory.good_count)?;
    let mesh = read_meshes(&mut ctx)?;

    let mut parts = mesh.parts;
    resolve_materials(&mut ctx, &mut parts, &display, &materials);

    let scene = SceneModel {
        parts,
        vertex_buffers: mesh.vertex_buffers,
        index_buffers: mesh.index_buffers,
        textures,
        texture_names: directory.names,
        diagnostics: Vec::new(),
    };

    for part in &scene.parts {
        if scene.part_vertices(part).is_none() {
            ctx.diagnose(
                "MESH",
                format!(
                    "part {}: vertices {:?} exceed buffer {}",
                    part.ordinal, part.vertex_range, part.vertex_buffer
                ),
            );
        }
        if scene.part_indices(part).is_none() {
            ctx.diagnose(
                "MESH",
                format!(
                    "part {}: indices {:?} exceed buffer {}",
                    part.ordinal, part.index_range, part.index_buffer
                ),
            );
        }
    }

    let scene = SceneModel {
        diagnostics: ctx.into_diagnostics(),
        ..scene
    };

    tracing::info!(
        "Decoded scene: {} parts, {} vertex buffers, {} index buffers, {} textures, {} diagnostics",
        scene.parts.len(),
        scene.vertex_buffers.len(),
        scene.index_buffers.len(),
        scene.textures.len(),
        scene.diagnostics.len()
    );
    Ok(scene)
}

/// Read and decode a `.gsc` file.
pub fn read_scene(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<SceneModel> {
    let path = path.as_ref();
    tracing::info!("Loading scene {}", path.display());
    let data = std::fs::read(path)?;
    decode_scene(data, options)
}

/// Holds the most recently loaded scene.
///
/// A failed load leaves the previous scene in place.
#[derive(Debug, Default)]
pub struct SceneLoader {
    options: DecodeOptions,
    current: Option<SceneModel>,
}

impl SceneLoader {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            current: None,
        }
    }

    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Load `path`, replacing the current scene on success.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&SceneModel> {
        let scene = read_scene(path, &self.options)?;
        Ok(&*self.current.insert(scene))
    }

    /// Decode `data`, replacing the current scene on success.
    pub fn load_bytes(&mut self, data: Vec<u8>) -> Result<&SceneModel> {
        let scene = decode_scene(data, &self.options)?;
        Ok(&*self.current.insert(scene))
    }

    #[must_use]
    pub fn current(&self) -> Option<&SceneModel> {
        self.current.as_ref()
    }

    /// Drop the current scene, handing it to the caller.
    pub fn take(&mut self) -> Option<SceneModel> {
        self.current.take()
    }
}
