//! CLI command for OBJ export

use std::path::Path;
use std::time::Instant;

use crate::cli::progress::{CUBE, LOOKING_GLASS, print_done, print_step};
use crate::converter::export_obj;
use crate::options::DecodeOptions;
use crate::scene::read_scene;

/// Export a scene's geometry to `output`, or next to the scene file.
pub fn execute(path: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let started = Instant::now();
    let output = output.map_or_else(|| path.with_extension("obj"), Path::to_path_buf);

    print_step(1, 2, LOOKING_GLASS, &format!("Decoding {}...", path.display()));
    let scene = read_scene(path, &DecodeOptions::geometry_only())?;

    print_step(
        2,
        2,
        CUBE,
        &format!("Writing {} parts to {}...", scene.parts().len(), output.display()),
    );
    export_obj(&scene, &output)?;

    print_done(started.elapsed());
    Ok(())
}
