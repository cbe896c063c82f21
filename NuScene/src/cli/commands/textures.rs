//! CLI command for dumping texture records

use std::path::Path;
use std::time::Instant;

use indicatif::ProgressBar;

use crate::cli::progress::{LOOKING_GLASS, PICTURE, bar_style, print_done, print_step};
use crate::converter::export_textures_with_progress;
use crate::options::DecodeOptions;
use crate::scene::read_scene;

/// Write every texture record of a scene to `dir`.
pub fn execute(path: &Path, dir: &Path, options: &DecodeOptions, quiet: bool) -> anyhow::Result<()> {
    let started = Instant::now();

    if !quiet {
        print_step(1, 2, LOOKING_GLASS, &format!("Decoding {}...", path.display()));
    }
    let scene = read_scene(path, options)?;
    let count = scene.textures().len();

    if !quiet {
        print_step(2, 2, PICTURE, &format!("Writing {count} textures..."));
    }

    let pb = if quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(count as u64)
    };
    pb.set_style(bar_style());
    pb.set_message("Writing");

    let written = export_textures_with_progress(&scene, dir, &|_| pb.inc(1))?;
    pb.finish_and_clear();

    if !quiet {
        println!("Written {} files to: {}", written.len(), dir.display());
        print_done(started.elapsed());
    }
    Ok(())
}
