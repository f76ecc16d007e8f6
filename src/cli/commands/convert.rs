//! Convert command
//!
//! Merges any mix of MDB and GR2 inputs into one output container.

use std::path::{Path, PathBuf};

use crate::compression::Compression;
use crate::convert::{self, ConvertOptions};

pub fn execute(
    inputs: &[PathBuf],
    output: &Path,
    compression: Compression,
    validate: bool,
) -> anyhow::Result<()> {
    let options = ConvertOptions {
        compression,
        validate,
    };
    let report = convert::convert(inputs, output, options)?;

    for input in &report.inputs {
        println!(
            "{} ({}): {} meshes, {} bones, {} animations, {} preserved chunks",
            input.path.display(),
            input.format,
            input.meshes,
            input.bones,
            input.animations,
            input.preserved_chunks
        );
    }
    println!("Wrote {}", report.output.display());

    Ok(())
}
