//! `.gr2` encoding
//!
//! Section sizes and the header checksum are recomputed from content on
//! every encode.

use std::io::Write;
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};

use super::{
    GR2_MAGIC, GR2_VERSION, HEADER_SIZE, NAME_SIZE, SECTION_ANIM, SECTION_DESC_SIZE,
    SECTION_INFO, SECTION_SKEL,
};
use crate::compression::{self, Compression};
use crate::error::Result;
use crate::formats::common::{BinaryWriter, ChunkId};
use crate::model::{Animation, ChunkSource, Model, Skeleton};
use crate::utils::write_atomic;

/// Encode a model's skeleton, animations, and name to GR2 bytes.
///
/// Meshes are not part of this container; they live in the companion MDB
/// file. Preserved raw chunks native to this container are re-emitted
/// after the known sections, with the same compression choice as
/// everything else; chunks preserved from an MDB input stay with MDB.
pub fn encode_gr2(model: &Model, method: Compression) -> Result<Vec<u8>> {
    let mut payloads: Vec<(ChunkId, Vec<u8>)> = Vec::new();
    payloads.push((SECTION_INFO, encode_info(&model.name)));
    if let Some(skeleton) = &model.skeleton {
        payloads.push((SECTION_SKEL, encode_skeleton(skeleton)));
    }
    if !model.animations.is_empty() {
        payloads.push((SECTION_ANIM, encode_animations(&model.animations)));
    }
    for chunk in &model.extra_chunks {
        if chunk.source == ChunkSource::Gr2 {
            payloads.push((chunk.id, chunk.data.clone()));
        }
    }

    let mut stored: Vec<(ChunkId, Compression, Vec<u8>, usize)> =
        Vec::with_capacity(payloads.len());
    for (id, payload) in payloads {
        let decompressed_size = payload.len();
        let packed = compression::compress(&payload, method)?;
        // Fall back to stored bytes when compression does not pay off.
        if method != Compression::None && packed.len() >= decompressed_size {
            stored.push((id, Compression::None, payload, decompressed_size));
        } else {
            stored.push((id, method, packed, decompressed_size));
        }
    }

    let table_end = HEADER_SIZE + stored.len() * SECTION_DESC_SIZE;
    let file_size = table_end + stored.iter().map(|(_, _, b, _)| b.len()).sum::<usize>();

    let mut hasher = crc32fast::Hasher::new();
    for (_, _, bytes, _) in &stored {
        hasher.update(bytes);
    }
    let crc32 = hasher.finalize();

    let mut out = Vec::with_capacity(file_size);
    out.write_all(&GR2_MAGIC)?;
    out.write_u32::<LittleEndian>(GR2_VERSION)?;
    out.write_u32::<LittleEndian>(file_size as u32)?;
    out.write_u32::<LittleEndian>(crc32)?;
    out.write_u32::<LittleEndian>(stored.len() as u32)?;

    let mut offset = table_end;
    for (id, method, bytes, decompressed_size) in &stored {
        out.write_all(id.as_bytes())?;
        out.write_u32::<LittleEndian>(method.tag())?;
        out.write_u32::<LittleEndian>(offset as u32)?;
        out.write_u32::<LittleEndian>(bytes.len() as u32)?;
        out.write_u32::<LittleEndian>(*decompressed_size as u32)?;
        out.write_u32::<LittleEndian>(0)?;
        offset += bytes.len();
    }

    for (_, _, bytes, _) in &stored {
        out.write_all(bytes)?;
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}

/// Encode a model and publish it atomically at `path`.
pub fn write_gr2<P: AsRef<Path>>(path: P, model: &Model, method: Compression) -> Result<()> {
    let bytes = encode_gr2(model, method)?;
    write_atomic(path.as_ref(), &bytes)
}

fn encode_info(name: &str) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_u32(name.len() as u32);
    w.write_bytes(name.as_bytes());
    w.into_bytes()
}

fn encode_skeleton(skeleton: &Skeleton) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_u32(skeleton.bones.len() as u32);
    for bone in &skeleton.bones {
        w.write_fixed_string(&bone.name, NAME_SIZE);
        w.write_i32(bone.parent.map_or(-1, |p| p as i32));
        w.write_vec3(bone.bind_pose.translation);
        w.write_quat(bone.bind_pose.rotation);
        w.write_vec3(bone.bind_pose.scale);
    }
    w.into_bytes()
}

fn encode_animations(animations: &[Animation]) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_u32(animations.len() as u32);
    for animation in animations {
        w.write_fixed_string(&animation.name, NAME_SIZE);
        w.write_f32(animation.duration);
        w.write_u32(animation.tracks.len() as u32);
        for track in &animation.tracks {
            w.write_u32(track.bone);
            w.write_u32(track.keys.len() as u32);
            for key in &track.keys {
                w.write_f32(key.time);
                w.write_vec3(key.translation);
                w.write_quat(key.rotation);
                w.write_vec3(key.scale);
            }
        }
    }
    w.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gr2::parse_gr2_bytes;
    use crate::model::{Bone, RawChunk};

    #[test]
    fn encode_is_idempotent() {
        let mut model = Model::new("creature");
        model.skeleton = Some(Skeleton {
            bones: vec![Bone::root("base"), Bone::child_of("spine", 0)],
        });
        let first = encode_gr2(&model, Compression::Zlib).unwrap();
        let second = encode_gr2(&model, Compression::Zlib).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_section_round_trips() {
        let mut model = Model::new("creature");
        model.extra_chunks.push(RawChunk {
            id: ChunkId::new(b"XTRA"),
            data: vec![0x5A; 100],
            source: ChunkSource::Gr2,
        });
        let bytes = encode_gr2(&model, Compression::None).unwrap();
        let decoded = parse_gr2_bytes(&bytes).unwrap();
        assert_eq!(decoded.extra_chunks, model.extra_chunks);
        assert_eq!(encode_gr2(&decoded, Compression::None).unwrap(), bytes);
    }

    #[test]
    fn foreign_chunks_stay_out_of_this_container() {
        let mut model = Model::new("creature");
        model.extra_chunks.push(RawChunk {
            id: ChunkId::new(b"TRRN"),
            data: vec![1, 2, 3],
            source: ChunkSource::Mdb,
        });
        let bytes = encode_gr2(&model, Compression::None).unwrap();
        let sections = crate::formats::gr2::index_sections(&bytes).unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, crate::formats::gr2::SECTION_INFO);
    }

    #[test]
    fn incompressible_payload_falls_back_to_stored() {
        // A 7-byte name cannot shrink under zlib; the descriptor must
        // say "stored" so decode does not misinterpret the bytes.
        let model = Model::new("abcdefg");
        let bytes = encode_gr2(&model, Compression::Zlib).unwrap();
        let sections = crate::formats::gr2::index_sections(&bytes).unwrap();
        assert_eq!(sections[0].compression, Compression::None);
        assert_eq!(parse_gr2_bytes(&bytes).unwrap().name, "abcdefg");
    }

    #[test]
    fn header_declares_exact_file_size() {
        let bytes = encode_gr2(&Model::new("x"), Compression::None).unwrap();
        let declared = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        assert_eq!(declared as usize, bytes.len());
    }
}
