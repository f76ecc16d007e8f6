use clap::Subcommand;
use std::path::PathBuf;

use crate::compression::Compression;

pub mod attrs;
pub mod convert;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert and merge model files (MDB and/or GR2)
    Convert {
        /// Input files; MDB inputs contribute geometry, GR2 inputs the rig
        inputs: Vec<PathBuf>,

        /// Output file; the extension picks the container
        #[arg(short, long)]
        output: PathBuf,

        /// Section compression for GR2 output
        #[arg(long, default_value = "zlib")]
        compression: Compression,

        /// Skip model validation before encoding
        #[arg(long)]
        no_validate: bool,
    },

    /// List the chunks or sections of a model file
    Inspect {
        /// Model file to inspect
        path: PathBuf,
    },

    /// Dump the scene attribute set of each mesh material
    Attrs {
        /// Model file to read materials from
        path: PathBuf,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                inputs,
                output,
                compression,
                no_validate,
            } => convert::execute(inputs, output, *compression, !*no_validate),
            Commands::Inspect { path } => inspect::execute(path),
            Commands::Attrs { path } => attrs::execute(path),
        }
    }
}
