//! Segmented `.gr2` skeleton/animation container
//!
//! Granny-style sectioned file: a fixed header with a checksum, a section
//! table of `{ fourcc, compression, offset, sizes }` descriptors, then the
//! section payloads, each independently compressible. Known sections are
//! `INFO` (model name), `SKEL` (bone table), and `ANIM` (keyframe tracks);
//! anything else is carried through untouched.

mod reader;
mod section;
mod writer;

pub use reader::{parse_gr2_bytes, read_gr2};
pub use section::{Section, index_sections, section_payload};
pub use writer::{encode_gr2, write_gr2};

use crate::formats::common::ChunkId;

/// GR2 file magic (first 4 bytes).
pub const GR2_MAGIC: [u8; 4] = [0xE5, 0x9B, 0x49, 0x5E];

/// Container version this codec reads and writes.
pub const GR2_VERSION: u32 = 1;

/// Header size: magic + version + file size + crc32 + section count.
pub const HEADER_SIZE: usize = 20;

/// Section descriptor size: fourcc + compression + offset + both sizes +
/// reserved word.
pub const SECTION_DESC_SIZE: usize = 24;

/// Known section fourccs.
pub const SECTION_INFO: ChunkId = ChunkId::new(b"INFO");
pub const SECTION_SKEL: ChunkId = ChunkId::new(b"SKEL");
pub const SECTION_ANIM: ChunkId = ChunkId::new(b"ANIM");

/// Pseudo-chunk id used for header-level corruption reports.
pub(crate) const HEADER_CHUNK: ChunkId = ChunkId::new(b"GR2 ");

/// Size of every fixed name field in section payloads.
pub const NAME_SIZE: usize = 32;
