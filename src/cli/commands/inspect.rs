//! Inspect command
//!
//! Lists the chunk/section table of a model file without decoding the
//! payloads any further than the index requires.

use std::path::Path;

use crate::convert::{ModelFormat, detect_format};
use crate::formats::{gr2, mdb};

pub fn execute(path: &Path) -> anyhow::Result<()> {
    let data = std::fs::read(path)?;
    let format = detect_format(path, &data)?;

    println!("Inspecting {} file: {}", format, path.display());
    println!("File size: {} bytes", data.len());
    println!();

    match format {
        ModelFormat::Mdb => inspect_mdb(&data),
        ModelFormat::Gr2 => inspect_gr2(&data),
    }
}

fn inspect_mdb(data: &[u8]) -> anyhow::Result<()> {
    let packets = mdb::index_packets(data)?;
    println!("Packets ({}):", packets.len());
    for (i, packet) in packets.iter().enumerate() {
        println!(
            "  [{:2}] {} | offset {:>8} | {:>8} bytes",
            i,
            packet.id,
            packet.range.offset,
            packet.range.len
        );
    }
    Ok(())
}

fn inspect_gr2(data: &[u8]) -> anyhow::Result<()> {
    let sections = gr2::index_sections(data)?;
    println!("Sections ({}):", sections.len());
    for (i, section) in sections.iter().enumerate() {
        let ratio = if section.range.len > 0 {
            format!(
                "{:.2}x",
                section.decompressed_size as f64 / section.range.len as f64
            )
        } else {
            "N/A".to_string()
        };
        println!(
            "  [{:2}] {} | {:6} | {:>8} -> {:>8} bytes ({})",
            i,
            section.id,
            section.compression.name(),
            section.range.len,
            section.decompressed_size,
            ratio
        );
    }
    Ok(())
}
