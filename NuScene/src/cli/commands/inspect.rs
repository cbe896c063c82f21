//! CLI command for inspecting scene containers

use std::path::Path;

use crate::options::DecodeOptions;
use crate::scene::read_scene;

/// Decode a scene and display its structure.
pub fn execute(path: &Path, json: Option<&Path>, options: &DecodeOptions) -> anyhow::Result<()> {
    println!("Inspecting scene: {}", path.display());
    println!();

    let scene = read_scene(path, options)?;
    let summary = scene.summary();

    println!("Scene Information");
    println!("=================");
    println!("Parts:          {}", summary.parts.len());
    println!(
        "Vertex buffers: {} ({} vertices)",
        summary.vertex_buffer_count, summary.vertex_count
    );
    println!(
        "Index buffers:  {} ({} indices)",
        summary.index_buffer_count, summary.index_count
    );
    println!(
        "Textures:       {} of {} named",
        summary.textures.len(),
        summary.texture_names.len()
    );
    println!();

    if !summary.textures.is_empty() {
        println!("Textures:");
        println!("---------");
        for texture in &summary.textures {
            println!(
                "  [{:3}] {:6} {:>5}x{:<5} mips={:<2} {}{}",
                texture.slot,
                texture.format.to_string(),
                texture.width,
                texture.height,
                texture.mip_count,
                texture.name.as_deref().unwrap_or("?"),
                if texture.cubemap { " (cube)" } else { "" }
            );
        }
        println!();
    }

    println!("Parts:");
    println!("------");
    for part in &summary.parts {
        let material = part
            .material
            .map_or_else(|| "-".to_string(), |m| m.to_string());
        let texture = match (part.texture, part.textured) {
            (Some(id), true) => id.to_string(),
            (Some(id), false) => format!("{id} (not loaded)"),
            (None, _) => "-".to_string(),
        };
        println!(
            "  [{:3}] vb {} [{}+{}]  ib {} [{}+{}]  material {material}  texture {texture}",
            part.ordinal,
            part.vertex_buffer,
            part.vertex_range.offset,
            part.vertex_range.count,
            part.index_buffer,
            part.index_range.offset,
            part.index_range.count,
        );
    }

    if !summary.diagnostics.is_empty() {
        println!();
        println!("{}Diagnostics ({}):", crate::cli::progress::WARNING, summary.diagnostics.len());
        for diagnostic in &summary.diagnostics {
            println!("  {}: {}", diagnostic.chunk, diagnostic.message);
        }
    }

    if let Some(output) = json {
        let text = serde_json::to_string_pretty(&summary)?;
        std::fs::write(output, text)?;
        println!();
        println!("Summary written to: {}", output.display());
    }

    Ok(())
}
