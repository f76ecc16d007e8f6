//! Container format handlers
//!
//! Two containers carry one model between them: the legacy monolithic
//! `.mdb` holds geometry and materials, the segmented `.gr2` holds the
//! skeleton and animations.

pub mod common;
pub mod gr2;
pub mod mdb;

// Re-export the main entry points
pub use common::{BinaryReader, BinaryWriter, ByteRange, ChunkId};
pub use gr2::{parse_gr2_bytes, read_gr2, write_gr2};
pub use mdb::{parse_mdb_bytes, read_mdb, write_mdb};
