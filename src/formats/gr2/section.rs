//! Section table indexing and payload extraction

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use super::{GR2_MAGIC, GR2_VERSION, HEADER_CHUNK, HEADER_SIZE, SECTION_DESC_SIZE};
use crate::compression::{self, Compression};
use crate::error::{Error, Result};
use crate::formats::common::{ByteRange, ChunkId};

/// One indexed section: identity, compression, and where its stored
/// (possibly compressed) bytes live in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: ChunkId,
    pub compression: Compression,
    /// Range of the stored bytes within the file.
    pub range: ByteRange,
    /// Payload size after decompression.
    pub decompressed_size: usize,
}

/// Enumerate the sections of a GR2 buffer in table order and verify the
/// header checksum over their stored bytes.
///
/// # Errors
/// Returns [`Error::InvalidSignature`] for a non-GR2 buffer,
/// [`Error::UnsupportedVersion`] for an unknown container version,
/// [`Error::UnsupportedCompression`] for an unrecognized compression tag,
/// and [`Error::CorruptChunk`] for a descriptor whose range leaves the
/// buffer or a checksum mismatch.
pub fn index_sections(data: &[u8]) -> Result<Vec<Section>> {
    if data.len() < HEADER_SIZE {
        return Err(Error::TruncatedInput {
            offset: 0,
            needed: HEADER_SIZE,
            available: data.len(),
        });
    }

    let mut cursor = Cursor::new(data);
    let mut magic = [0u8; 4];
    std::io::Read::read_exact(&mut cursor, &mut magic)?;
    if magic != GR2_MAGIC {
        return Err(Error::InvalidSignature {
            expected: "GR2",
            found: magic,
        });
    }

    let version = cursor.read_u32::<LittleEndian>()?;
    if version != GR2_VERSION {
        return Err(Error::UnsupportedVersion {
            format: "GR2",
            version,
        });
    }

    let file_size = cursor.read_u32::<LittleEndian>()? as usize;
    if file_size != data.len() {
        tracing::warn!(
            "GR2 header declares {file_size} bytes, buffer has {}",
            data.len()
        );
    }
    let crc32 = cursor.read_u32::<LittleEndian>()?;
    let section_count = cursor.read_u32::<LittleEndian>()? as usize;

    let table_end = HEADER_SIZE + section_count * SECTION_DESC_SIZE;
    if table_end > data.len() {
        return Err(Error::TruncatedInput {
            offset: HEADER_SIZE,
            needed: section_count * SECTION_DESC_SIZE,
            available: data.len() - HEADER_SIZE,
        });
    }

    let mut sections = Vec::with_capacity(section_count);
    for _ in 0..section_count {
        let mut fourcc = [0u8; 4];
        std::io::Read::read_exact(&mut cursor, &mut fourcc)?;
        let id = ChunkId(fourcc);
        let compression_tag = cursor.read_u32::<LittleEndian>()?;
        let data_offset = cursor.read_u32::<LittleEndian>()? as usize;
        let compressed_size = cursor.read_u32::<LittleEndian>()? as usize;
        let decompressed_size = cursor.read_u32::<LittleEndian>()? as usize;
        let _reserved = cursor.read_u32::<LittleEndian>()?;

        let compression = Compression::from_tag(compression_tag, id)?;
        let range = ByteRange::new(data_offset, compressed_size);
        if range.end() > data.len() {
            return Err(Error::CorruptChunk {
                chunk: id,
                offset: data_offset,
                message: format!(
                    "stored bytes ({compressed_size}) run past end of file ({})",
                    data.len()
                ),
            });
        }

        sections.push(Section {
            id,
            compression,
            range,
            decompressed_size,
        });
    }

    let mut hasher = crc32fast::Hasher::new();
    for section in &sections {
        hasher.update(&data[section.range.offset..section.range.end()]);
    }
    let computed = hasher.finalize();
    if computed != crc32 {
        return Err(Error::CorruptChunk {
            chunk: HEADER_CHUNK,
            offset: 12,
            message: format!("checksum mismatch: header {crc32:#010x}, computed {computed:#010x}"),
        });
    }

    Ok(sections)
}

/// Extract and decompress one section's payload.
pub fn section_payload(data: &[u8], section: &Section) -> Result<Vec<u8>> {
    let stored = &data[section.range.offset..section.range.end()];
    let payload = compression::decompress(stored, section.compression, section.decompressed_size)?;
    if payload.len() != section.decompressed_size {
        return Err(Error::CorruptChunk {
            chunk: section.id,
            offset: section.range.offset,
            message: format!(
                "decompressed to {} bytes, descriptor declares {}",
                payload.len(),
                section.decompressed_size
            ),
        });
    }
    Ok(payload)
}
