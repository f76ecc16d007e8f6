//! `.gr2` reading: skeleton and animation decoding

use std::path::Path;

use super::{NAME_SIZE, SECTION_ANIM, SECTION_INFO, SECTION_SKEL, index_sections, section_payload};
use crate::error::{Error, Result};
use crate::formats::common::BinaryReader;
use crate::model::{
    Animation, Bone, ChunkSource, Keyframe, Model, RawChunk, Skeleton, Track, Transform,
};

use super::Section;

/// Read a `.gr2` file from disk.
pub fn read_gr2<P: AsRef<Path>>(path: P) -> Result<Model> {
    let data = std::fs::read(path.as_ref())?;
    parse_gr2_bytes(&data)
}

/// Parse GR2 data from bytes.
///
/// A failed decode returns the error alone; no partially populated model
/// escapes.
pub fn parse_gr2_bytes(data: &[u8]) -> Result<Model> {
    let sections = index_sections(data)?;
    tracing::debug!("GR2 contains {} sections", sections.len());

    let mut model = Model::default();
    for section in &sections {
        let payload = section_payload(data, section)?;
        match section.id {
            id if id == SECTION_INFO => {
                model.name = decode_info(section, &payload)?;
            }
            id if id == SECTION_SKEL => {
                model.skeleton = Some(decode_skeleton(section, &payload)?);
            }
            id if id == SECTION_ANIM => {
                model.animations = decode_animations(section, &payload)?;
            }
            id => {
                tracing::debug!("preserving unknown section {id} ({} bytes)", payload.len());
                model.extra_chunks.push(RawChunk {
                    id,
                    data: payload,
                    source: ChunkSource::Gr2,
                });
            }
        }
    }

    Ok(model)
}

fn corrupt(section: &Section, reader: &BinaryReader<'_>, message: String) -> Error {
    Error::CorruptChunk {
        chunk: section.id,
        offset: section.range.offset + reader.position(),
        message,
    }
}

fn check_fully_consumed(section: &Section, reader: &BinaryReader<'_>, what: &str) -> Result<()> {
    if !reader.is_empty() {
        return Err(corrupt(
            section,
            reader,
            format!("{} trailing bytes after {what}", reader.remaining()),
        ));
    }
    Ok(())
}

fn decode_info(section: &Section, payload: &[u8]) -> Result<String> {
    let mut reader = BinaryReader::new(payload);
    let len = reader.read_u32()? as usize;
    let bytes = reader.read_bytes(len)?;
    let name = String::from_utf8(bytes.to_vec())
        .map_err(|e| corrupt(section, &reader, format!("model name is not UTF-8: {e}")))?;
    check_fully_consumed(section, &reader, "model name")?;
    Ok(name)
}

fn decode_skeleton(section: &Section, payload: &[u8]) -> Result<Skeleton> {
    let mut reader = BinaryReader::new(payload);
    let bone_count = reader.read_u32()? as usize;

    let mut bones = Vec::with_capacity(bone_count);
    for index in 0..bone_count {
        let name = reader.read_fixed_string(NAME_SIZE)?;
        let parent = reader.read_i32()?;

        // Parents must come before children in the bone table; anything
        // else breaks every traversal downstream, so it is rejected here
        // rather than reordered.
        let parent = match parent {
            -1 => None,
            p if p >= 0 && (p as usize) < index => Some(p as u32),
            p => {
                return Err(Error::InvalidBoneHierarchy {
                    bone: name,
                    index: index as u32,
                    parent: p,
                });
            }
        };

        let bind_pose = Transform {
            translation: reader.read_vec3()?,
            rotation: reader.read_quat()?,
            scale: reader.read_vec3()?,
        };
        bones.push(Bone {
            name,
            parent,
            bind_pose,
        });
    }

    check_fully_consumed(section, &reader, "bone table")?;
    Ok(Skeleton { bones })
}

fn decode_animations(section: &Section, payload: &[u8]) -> Result<Vec<Animation>> {
    let mut reader = BinaryReader::new(payload);
    let animation_count = reader.read_u32()? as usize;

    let mut animations = Vec::with_capacity(animation_count);
    for _ in 0..animation_count {
        let name = reader.read_fixed_string(NAME_SIZE)?;
        let duration = reader.read_f32()?;
        let track_count = reader.read_u32()? as usize;

        let mut tracks = Vec::with_capacity(track_count);
        for _ in 0..track_count {
            let bone = reader.read_u32()?;
            let key_count = reader.read_u32()? as usize;

            // A zero-key track is legal: the bone keeps its bind pose.
            let mut keys: Vec<Keyframe> = Vec::with_capacity(key_count);
            for _ in 0..key_count {
                let key = Keyframe {
                    time: reader.read_f32()?,
                    translation: reader.read_vec3()?,
                    rotation: reader.read_quat()?,
                    scale: reader.read_vec3()?,
                };
                if let Some(last) = keys.last() {
                    if key.time <= last.time {
                        return Err(corrupt(
                            section,
                            &reader,
                            format!(
                                "animation '{name}' track for bone {bone} has \
                                 non-increasing key times ({} then {})",
                                last.time, key.time
                            ),
                        ));
                    }
                }
                keys.push(key);
            }
            tracks.push(Track { bone, keys });
        }

        animations.push(Animation {
            name,
            duration,
            tracks,
        });
    }

    check_fully_consumed(section, &reader, "animation table")?;
    Ok(animations)
}
