//! Packet key table indexing
//!
//! The MDB chunk index is a fixed-size table directly after the header:
//! one `{ fourcc, offset }` key per packet. The packet's byte range is
//! recovered by reading the size field the packet restates at its offset.

use super::{HEADER_SIZE, MAJOR_VERSION, MDB_SIGNATURE, PACKET_HEADER_SIZE, PACKET_KEY_SIZE};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryReader, ByteRange, ChunkId};

/// One indexed packet: its fourcc and the byte range of the whole packet
/// (header included).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketEntry {
    pub id: ChunkId,
    pub range: ByteRange,
}

impl PacketEntry {
    /// Byte range of the packet payload, with the packet header skipped.
    pub fn payload_range(&self) -> ByteRange {
        ByteRange::new(
            self.range.offset + PACKET_HEADER_SIZE,
            self.range.len - PACKET_HEADER_SIZE,
        )
    }
}

/// Enumerate the packets of an MDB buffer in key-table order.
///
/// # Errors
/// Returns [`Error::InvalidSignature`] for a non-MDB buffer,
/// [`Error::UnsupportedVersion`] for an unknown major version, and
/// [`Error::CorruptChunk`] when a key points outside the buffer or a
/// packet's declared size overruns it.
pub fn index_packets(data: &[u8]) -> Result<Vec<PacketEntry>> {
    let mut reader = BinaryReader::new(data);

    let signature = reader.read_fourcc()?;
    if signature != MDB_SIGNATURE {
        return Err(Error::InvalidSignature {
            expected: "NWN2",
            found: signature,
        });
    }

    let major_version = reader.read_u16()?;
    let minor_version = reader.read_u16()?;
    if major_version != MAJOR_VERSION {
        return Err(Error::UnsupportedVersion {
            format: "MDB",
            version: u32::from(major_version),
        });
    }
    tracing::debug!("MDB version {major_version}.{minor_version}");

    let packet_count = reader.read_u32()? as usize;
    let keys_end = HEADER_SIZE + packet_count * PACKET_KEY_SIZE;
    if keys_end > data.len() {
        return Err(Error::TruncatedInput {
            offset: HEADER_SIZE,
            needed: packet_count * PACKET_KEY_SIZE,
            available: data.len() - HEADER_SIZE,
        });
    }

    let mut entries = Vec::with_capacity(packet_count);
    for _ in 0..packet_count {
        let id = ChunkId(reader.read_fourcc()?);
        let offset = reader.read_u32()? as usize;
        entries.push((id, offset));
    }

    let mut packets = Vec::with_capacity(packet_count);
    for (id, offset) in entries {
        if offset + PACKET_HEADER_SIZE > data.len() {
            return Err(Error::CorruptChunk {
                chunk: id,
                offset,
                message: format!(
                    "packet key points at offset {offset} but the file is {} bytes",
                    data.len()
                ),
            });
        }

        // The packet restates its fourcc; a mismatch means the key table
        // and the packet bodies disagree.
        let mut packet = BinaryReader::new(&data[offset..]);
        let restated = ChunkId(packet.read_fourcc()?);
        if restated != id {
            return Err(Error::CorruptChunk {
                chunk: id,
                offset,
                message: format!("packet restates fourcc {restated}"),
            });
        }

        let payload_size = packet.read_u32()? as usize;
        let total = PACKET_HEADER_SIZE + payload_size;
        if offset + total > data.len() {
            return Err(Error::CorruptChunk {
                chunk: id,
                offset,
                message: format!(
                    "declared payload of {payload_size} bytes runs past end of file"
                ),
            });
        }

        packets.push(PacketEntry {
            id,
            range: ByteRange::new(offset, total),
        });
    }

    Ok(packets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::common::BinaryWriter;

    fn minimal_mdb(packets: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut w = BinaryWriter::new();
        w.write_bytes(&MDB_SIGNATURE);
        w.write_u16(MAJOR_VERSION);
        w.write_u16(12);
        w.write_u32(packets.len() as u32);

        let mut offset = HEADER_SIZE + packets.len() * PACKET_KEY_SIZE;
        for (id, payload) in packets {
            w.write_bytes(*id);
            w.write_u32(offset as u32);
            offset += PACKET_HEADER_SIZE + payload.len();
        }
        for (id, payload) in packets {
            w.write_bytes(*id);
            w.write_u32(payload.len() as u32);
            w.write_bytes(payload);
        }
        w.into_bytes()
    }

    #[test]
    fn indexes_packets_in_table_order() {
        let data = minimal_mdb(&[(b"HOOK", &[1, 2, 3]), (b"COLS", &[4])]);
        let packets = index_packets(&data).unwrap();
        assert_eq!(packets.len(), 2);
        assert_eq!(packets[0].id, ChunkId::new(b"HOOK"));
        assert_eq!(packets[0].range, ByteRange::new(28, 11));
        assert_eq!(packets[0].payload_range(), ByteRange::new(36, 3));
        assert_eq!(packets[1].id, ChunkId::new(b"COLS"));
    }

    #[test]
    fn bad_signature_is_rejected() {
        let mut data = minimal_mdb(&[]);
        data[0] = b'X';
        assert!(matches!(
            index_packets(&data),
            Err(Error::InvalidSignature { .. })
        ));
    }

    #[test]
    fn oversized_packet_is_corrupt() {
        let mut data = minimal_mdb(&[(b"HOOK", &[0u8; 4])]);
        // Inflate the declared payload size past the end of the buffer.
        let size_pos = HEADER_SIZE + PACKET_KEY_SIZE + 4;
        data[size_pos..size_pos + 4].copy_from_slice(&1000u32.to_le_bytes());
        assert!(matches!(
            index_packets(&data),
            Err(Error::CorruptChunk { .. })
        ));
    }
}
