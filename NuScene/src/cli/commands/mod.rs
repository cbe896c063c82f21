use clap::Subcommand;
use std::path::PathBuf;

pub mod execute;
pub mod inspect;
pub mod obj;
pub mod textures;

#[derive(Subcommand)]
pub enum Commands {
    /// Decode a scene and print its parts, buffers and textures
    Inspect {
        /// Scene file (.gsc)
        file: PathBuf,

        /// Also write the scene summary as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Fail on texture formats the decoder does not recognise
        #[arg(long)]
        strict: bool,

        /// Skip the texture region
        #[arg(long)]
        no_textures: bool,
    },

    /// Write every texture record as a standalone .dds file
    Textures {
        /// Scene file (.gsc)
        file: PathBuf,

        /// Output directory
        dir: PathBuf,

        /// Fail on texture formats the decoder does not recognise
        #[arg(long)]
        strict: bool,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Export scene geometry as Wavefront OBJ
    Obj {
        /// Scene file (.gsc)
        file: PathBuf,

        /// Output file (defaults to the scene path with an .obj extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
