//! Command execution implementations

use super::Commands;
use super::{inspect, obj, textures};
use crate::options::DecodeOptions;

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if decoding or writing output fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect {
                file,
                json,
                strict,
                no_textures,
            } => {
                let options = DecodeOptions::new()
                    .with_strict_textures(*strict)
                    .with_skip_textures(*no_textures);
                inspect::execute(file, json.as_deref(), &options)
            }
            Commands::Textures {
                file,
                dir,
                strict,
                quiet,
            } => {
                let options = DecodeOptions::new().with_strict_textures(*strict);
                textures::execute(file, dir, &options, *quiet)
            }
            Commands::Obj { file, output } => obj::execute(file, output.as_deref()),
        }
    }
}
