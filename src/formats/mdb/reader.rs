//! `.mdb` reading and geometry packet decoding

use std::path::Path;

use super::{
    COLLISION_SPHERE_SIZE, COLLISION_VERTEX_SIZE, FACE_SIZE, HAIR_SIZE, HELM_SIZE, HOOK_SIZE,
    PACKET_COL2, PACKET_COL3, PACKET_COLS, PACKET_HAIR, PACKET_HELM, PACKET_HOOK, PACKET_RIGD,
    PACKET_SKIN, PACKET_WALK, RIGID_VERTEX_SIZE, SKIN_VERTEX_SIZE, WALK_FACE_SIZE,
    WALK_VERTEX_SIZE, NAME_SIZE, index_packets,
};
use crate::error::{Error, Result};
use crate::formats::common::BinaryReader;
use crate::model::{
    ChunkSource, CollisionSphere, HairInfo, HelmInfo, HookPoint, Material, MaterialFlags, Mesh,
    MeshKind, Model, RawChunk, Vertex, VertexWeights,
};

use super::PacketEntry;

/// Read an `.mdb` file from disk.
///
/// The model name is taken from the file stem; the container itself does
/// not store one.
pub fn read_mdb<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let mut model = parse_mdb_bytes(&data)?;
    model.name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(model)
}

/// Parse MDB data from bytes.
///
/// Geometry packets become meshes and placement packets become their
/// typed records; anything else is preserved as a raw chunk so a
/// re-encode emits it unchanged.
pub fn parse_mdb_bytes(data: &[u8]) -> Result<Model> {
    let packets = index_packets(data)?;
    tracing::debug!("MDB contains {} packets", packets.len());

    let mut model = Model::default();
    for entry in packets {
        let payload_range = entry.payload_range();
        let payload = &data[payload_range.offset..payload_range.end()];

        match entry.id {
            id if id == PACKET_RIGD => {
                model.meshes.push(decode_rigid(&entry, payload)?);
            }
            id if id == PACKET_SKIN => {
                model.meshes.push(decode_skin(&entry, payload)?);
            }
            id if id == PACKET_COL2 || id == PACKET_COL3 => {
                model.meshes.push(decode_collision(&entry, payload)?);
            }
            id if id == PACKET_WALK => {
                model.meshes.push(decode_walk(&entry, payload)?);
            }
            id if id == PACKET_HOOK => {
                model.hook_points.push(decode_hook(&entry, payload)?);
            }
            id if id == PACKET_HAIR => {
                model.hair_info.push(decode_hair(&entry, payload)?);
            }
            id if id == PACKET_HELM => {
                model.helm_info.push(decode_helm(&entry, payload)?);
            }
            id if id == PACKET_COLS => {
                model
                    .collision_spheres
                    .extend(decode_spheres(&entry, payload)?);
            }
            id => {
                tracing::debug!("preserving unknown packet {id} ({} bytes)", payload.len());
                model.extra_chunks.push(RawChunk {
                    id,
                    data: payload.to_vec(),
                    source: ChunkSource::Mdb,
                });
            }
        }
    }

    Ok(model)
}

/// Decode the shared material block.
fn decode_material(reader: &mut BinaryReader<'_>) -> Result<Material> {
    let mut material = Material {
        diffuse_map: reader.read_fixed_string(NAME_SIZE)?,
        normal_map: reader.read_fixed_string(NAME_SIZE)?,
        tint_map: reader.read_fixed_string(NAME_SIZE)?,
        glow_map: reader.read_fixed_string(NAME_SIZE)?,
        ..Material::default()
    };
    // Colors are normalized; clamp here as on encode so a hand-edited
    // file cannot smuggle out-of-range values into the model.
    let diffuse = reader.read_vec3()?.clamp(glam::Vec3::ZERO, glam::Vec3::ONE);
    let specular = reader.read_vec3()?.clamp(glam::Vec3::ZERO, glam::Vec3::ONE);
    material.diffuse_color = diffuse.to_array();
    material.specular_color = specular.to_array();
    material.glossiness = reader.read_f32()?;
    material.specular_level = reader.read_f32()?;
    material.set_flags(MaterialFlags(reader.read_u32()?));
    Ok(material)
}

/// Check declared counts against the bytes actually present in the packet
/// before any vertex is read.
fn check_counts(
    entry: &PacketEntry,
    reader: &BinaryReader<'_>,
    vertex_count: usize,
    vertex_size: usize,
    face_count: usize,
    face_size: usize,
) -> Result<()> {
    let needed = vertex_count * vertex_size + face_count * face_size;
    if needed > reader.remaining() {
        return Err(Error::CorruptChunk {
            chunk: entry.id,
            offset: entry.range.offset,
            message: format!(
                "declares {vertex_count} vertices and {face_count} faces \
                 ({needed} bytes) but only {} bytes remain",
                reader.remaining()
            ),
        });
    }
    Ok(())
}

fn read_faces(reader: &mut BinaryReader<'_>, count: usize) -> Result<Vec<[u16; 3]>> {
    let mut faces = Vec::with_capacity(count);
    for _ in 0..count {
        faces.push([reader.read_u16()?, reader.read_u16()?, reader.read_u16()?]);
    }
    Ok(faces)
}

fn decode_rigid(entry: &PacketEntry, payload: &[u8]) -> Result<Mesh> {
    let mut reader = BinaryReader::new(payload);
    let mut mesh = Mesh::new(reader.read_fixed_string(NAME_SIZE)?, MeshKind::Rigid);
    mesh.material = decode_material(&mut reader)?;

    let vertex_count = reader.read_u32()? as usize;
    let face_count = reader.read_u32()? as usize;
    check_counts(entry, &reader, vertex_count, RIGID_VERTEX_SIZE, face_count, FACE_SIZE)?;

    for _ in 0..vertex_count {
        mesh.vertices.push(Vertex {
            position: reader.read_vec3()?,
            normal: reader.read_vec3()?,
            tangent: reader.read_vec3()?,
            binormal: reader.read_vec3()?,
            uv: reader.read_vec3()?,
            weights: None,
        });
    }
    mesh.faces = read_faces(&mut reader, face_count)?;
    Ok(mesh)
}

fn decode_skin(entry: &PacketEntry, payload: &[u8]) -> Result<Mesh> {
    let mut reader = BinaryReader::new(payload);
    let name = reader.read_fixed_string(NAME_SIZE)?;
    let skeleton_name = reader.read_fixed_string(NAME_SIZE)?;
    let mut mesh = Mesh::new(name, MeshKind::Skin { skeleton_name });
    mesh.material = decode_material(&mut reader)?;

    let vertex_count = reader.read_u32()? as usize;
    let face_count = reader.read_u32()? as usize;
    check_counts(entry, &reader, vertex_count, SKIN_VERTEX_SIZE, face_count, FACE_SIZE)?;

    for _ in 0..vertex_count {
        let position = reader.read_vec3()?;
        let normal = reader.read_vec3()?;
        let mut weights = VertexWeights::default();
        for w in &mut weights.bone_weights {
            *w = reader.read_f32()?;
        }
        for i in &mut weights.bone_indices {
            *i = reader.read_u8()?;
        }
        let tangent = reader.read_vec3()?;
        let binormal = reader.read_vec3()?;
        let uv = reader.read_vec3()?;

        // The influence count is stored as a float. Anything above the
        // four slots the format provides cannot be represented.
        let influences = reader.read_f32()?;
        if influences > 4.0 {
            return Err(Error::UnsupportedVertexFormat {
                influences: influences as u32,
            });
        }

        mesh.vertices.push(Vertex {
            position,
            normal,
            tangent,
            binormal,
            uv,
            weights: Some(weights),
        });
    }
    mesh.faces = read_faces(&mut reader, face_count)?;
    Ok(mesh)
}

fn decode_collision(entry: &PacketEntry, payload: &[u8]) -> Result<Mesh> {
    let kind = if entry.id == PACKET_COL2 {
        MeshKind::Collision2
    } else {
        MeshKind::Collision3
    };

    let mut reader = BinaryReader::new(payload);
    let mut mesh = Mesh::new(reader.read_fixed_string(NAME_SIZE)?, kind);
    mesh.material = decode_material(&mut reader)?;

    let vertex_count = reader.read_u32()? as usize;
    let face_count = reader.read_u32()? as usize;
    check_counts(entry, &reader, vertex_count, COLLISION_VERTEX_SIZE, face_count, FACE_SIZE)?;

    for _ in 0..vertex_count {
        mesh.vertices.push(Vertex {
            position: reader.read_vec3()?,
            normal: reader.read_vec3()?,
            uv: reader.read_vec3()?,
            ..Vertex::default()
        });
    }
    mesh.faces = read_faces(&mut reader, face_count)?;
    Ok(mesh)
}

fn decode_walk(entry: &PacketEntry, payload: &[u8]) -> Result<Mesh> {
    let mut reader = BinaryReader::new(payload);
    let mut mesh = Mesh::new(reader.read_fixed_string(NAME_SIZE)?, MeshKind::Walk);
    mesh.walk_ui_flags = reader.read_u32()?;

    let vertex_count = reader.read_u32()? as usize;
    let face_count = reader.read_u32()? as usize;
    check_counts(entry, &reader, vertex_count, WALK_VERTEX_SIZE, face_count, WALK_FACE_SIZE)?;

    for _ in 0..vertex_count {
        mesh.vertices.push(Vertex {
            position: reader.read_vec3()?,
            ..Vertex::default()
        });
    }
    for _ in 0..face_count {
        mesh.faces
            .push([reader.read_u16()?, reader.read_u16()?, reader.read_u16()?]);
        mesh.walk_surfaces.push(reader.read_u16()?);
    }
    Ok(mesh)
}

/// Require a placement packet's payload to be exactly its fixed size.
fn check_exact_size(entry: &PacketEntry, payload: &[u8], expected: usize) -> Result<()> {
    if payload.len() != expected {
        return Err(Error::CorruptChunk {
            chunk: entry.id,
            offset: entry.range.offset,
            message: format!("payload is {} bytes, layout requires {expected}", payload.len()),
        });
    }
    Ok(())
}

fn read_orientation(reader: &mut BinaryReader<'_>) -> Result<[[f32; 3]; 3]> {
    let mut rows = [[0.0f32; 3]; 3];
    for row in &mut rows {
        for value in row.iter_mut() {
            *value = reader.read_f32()?;
        }
    }
    Ok(rows)
}

fn decode_hook(entry: &PacketEntry, payload: &[u8]) -> Result<HookPoint> {
    check_exact_size(entry, payload, HOOK_SIZE)?;
    let mut reader = BinaryReader::new(payload);
    Ok(HookPoint {
        name: reader.read_fixed_string(NAME_SIZE)?,
        point_type: reader.read_u16()?,
        point_size: reader.read_u16()?,
        position: reader.read_vec3()?,
        orientation: read_orientation(&mut reader)?,
    })
}

fn decode_hair(entry: &PacketEntry, payload: &[u8]) -> Result<HairInfo> {
    check_exact_size(entry, payload, HAIR_SIZE)?;
    let mut reader = BinaryReader::new(payload);
    Ok(HairInfo {
        name: reader.read_fixed_string(NAME_SIZE)?,
        shortening_behavior: reader.read_u32()?,
        position: reader.read_vec3()?,
        orientation: read_orientation(&mut reader)?,
    })
}

fn decode_helm(entry: &PacketEntry, payload: &[u8]) -> Result<HelmInfo> {
    check_exact_size(entry, payload, HELM_SIZE)?;
    let mut reader = BinaryReader::new(payload);
    Ok(HelmInfo {
        name: reader.read_fixed_string(NAME_SIZE)?,
        hiding_behavior: reader.read_u32()?,
        position: reader.read_vec3()?,
        orientation: read_orientation(&mut reader)?,
    })
}

fn decode_spheres(entry: &PacketEntry, payload: &[u8]) -> Result<Vec<CollisionSphere>> {
    let mut reader = BinaryReader::new(payload);
    let count = reader.read_u32()? as usize;
    if reader.remaining() != count * COLLISION_SPHERE_SIZE {
        return Err(Error::CorruptChunk {
            chunk: entry.id,
            offset: entry.range.offset,
            message: format!(
                "declares {count} spheres but carries {} bytes of records",
                reader.remaining()
            ),
        });
    }

    let mut spheres = Vec::with_capacity(count);
    for _ in 0..count {
        spheres.push(CollisionSphere {
            bone_index: reader.read_u32()?,
            radius: reader.read_f32()?,
        });
    }
    Ok(spheres)
}
