//! Legacy monolithic `.mdb` model container
//!
//! Layout: a 12-byte header (`NWN2` signature, version, packet count)
//! followed by a packet key table (fourcc + absolute offset per packet)
//! and the packets themselves. Each packet restates its fourcc and its
//! payload size. Geometry packet families (`RIGD`, `SKIN`, `COL2`/`COL3`,
//! `WALK`) are decoded into meshes, placement packets (`HOOK`, `HAIR`,
//! `HELM`, `COLS`) into their fixed-layout records; any other packet is
//! carried through untouched.

mod index;
mod reader;
mod writer;

pub use index::{PacketEntry, index_packets};
pub use reader::{parse_mdb_bytes, read_mdb};
pub use writer::{encode_mdb, write_mdb};

use crate::formats::common::ChunkId;

/// File signature at offset 0.
pub const MDB_SIGNATURE: [u8; 4] = *b"NWN2";

/// Container version this codec reads and writes.
pub const MAJOR_VERSION: u16 = 1;
pub const MINOR_VERSION: u16 = 12;

/// Header size: signature + major + minor + packet count.
pub const HEADER_SIZE: usize = 12;

/// Packet key entry size: fourcc + u32 offset.
pub const PACKET_KEY_SIZE: usize = 8;

/// Packet header size: fourcc + u32 payload size.
pub const PACKET_HEADER_SIZE: usize = 8;

/// Size of every fixed name field.
pub const NAME_SIZE: usize = 32;

/// Size of the material block: four map names, two colors, two scalars,
/// and the flag word.
pub const MATERIAL_SIZE: usize = 4 * NAME_SIZE + 2 * 12 + 2 * 4 + 4;

/// Geometry packet fourccs.
pub const PACKET_RIGD: ChunkId = ChunkId::new(b"RIGD");
pub const PACKET_SKIN: ChunkId = ChunkId::new(b"SKIN");
pub const PACKET_COL2: ChunkId = ChunkId::new(b"COL2");
pub const PACKET_COL3: ChunkId = ChunkId::new(b"COL3");
pub const PACKET_WALK: ChunkId = ChunkId::new(b"WALK");

/// Placement packet fourccs.
pub const PACKET_HOOK: ChunkId = ChunkId::new(b"HOOK");
pub const PACKET_HAIR: ChunkId = ChunkId::new(b"HAIR");
pub const PACKET_HELM: ChunkId = ChunkId::new(b"HELM");
pub const PACKET_COLS: ChunkId = ChunkId::new(b"COLS");

/// Placement packet payload sizes: name, one or two flag words, position,
/// and a 3x3 orientation.
pub const HOOK_SIZE: usize = NAME_SIZE + 2 + 2 + 12 + 36;
pub const HAIR_SIZE: usize = NAME_SIZE + 4 + 12 + 36;
pub const HELM_SIZE: usize = NAME_SIZE + 4 + 12 + 36;

/// One collision sphere record: bone index + radius.
pub const COLLISION_SPHERE_SIZE: usize = 8;

/// Per-vertex strides of the geometry packet families.
pub const RIGID_VERTEX_SIZE: usize = 15 * 4;
pub const SKIN_VERTEX_SIZE: usize = 21 * 4;
pub const COLLISION_VERTEX_SIZE: usize = 9 * 4;
pub const WALK_VERTEX_SIZE: usize = 3 * 4;

/// Face sizes: three u16 indices, plus a u16 surface word for walk faces.
pub const FACE_SIZE: usize = 6;
pub const WALK_FACE_SIZE: usize = 8;
