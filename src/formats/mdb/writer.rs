//! `.mdb` encoding
//!
//! Packet sizes, offsets, and counts are always recomputed from content;
//! nothing cached at decode time is trusted, so an edited model re-encodes
//! correctly.

use std::path::Path;

use super::{
    HEADER_SIZE, MAJOR_VERSION, MDB_SIGNATURE, MINOR_VERSION, NAME_SIZE, PACKET_COL2,
    PACKET_COL3, PACKET_COLS, PACKET_HAIR, PACKET_HEADER_SIZE, PACKET_HELM, PACKET_HOOK,
    PACKET_KEY_SIZE, PACKET_RIGD, PACKET_SKIN, PACKET_WALK,
};
use crate::error::{Error, Result};
use crate::formats::common::{BinaryWriter, ChunkId};
use crate::model::{
    ChunkSource, CollisionSphere, HairInfo, HelmInfo, HookPoint, Material, Mesh, MeshKind, Model,
};
use crate::utils::write_atomic;

/// Encode a model to MDB bytes.
///
/// Meshes are emitted in order, then placement packets, then preserved
/// raw chunks native to this container. The skeleton and animations are
/// not part of it; they live in the companion GR2 file.
pub fn encode_mdb(model: &Model) -> Result<Vec<u8>> {
    let mut packets: Vec<(ChunkId, Vec<u8>)> = Vec::new();
    for mesh in &model.meshes {
        packets.push(encode_mesh(mesh)?);
    }
    for hook in &model.hook_points {
        packets.push((PACKET_HOOK, encode_hook(hook)));
    }
    for hair in &model.hair_info {
        packets.push((PACKET_HAIR, encode_hair(hair)));
    }
    for helm in &model.helm_info {
        packets.push((PACKET_HELM, encode_helm(helm)));
    }
    if !model.collision_spheres.is_empty() {
        packets.push((PACKET_COLS, encode_spheres(&model.collision_spheres)));
    }
    for chunk in &model.extra_chunks {
        if chunk.source == ChunkSource::Mdb {
            packets.push((chunk.id, chunk.data.clone()));
        }
    }

    let mut w = BinaryWriter::new();
    w.write_bytes(&MDB_SIGNATURE);
    w.write_u16(MAJOR_VERSION);
    w.write_u16(MINOR_VERSION);
    w.write_u32(packets.len() as u32);

    let mut offset = HEADER_SIZE + packets.len() * PACKET_KEY_SIZE;
    for (id, payload) in &packets {
        w.write_bytes(id.as_bytes());
        w.write_u32(offset as u32);
        offset += PACKET_HEADER_SIZE + payload.len();
    }

    for (id, payload) in &packets {
        w.write_bytes(id.as_bytes());
        w.write_u32(payload.len() as u32);
        w.write_bytes(payload);
    }

    Ok(w.into_bytes())
}

/// Encode a model and publish it atomically at `path`.
pub fn write_mdb<P: AsRef<Path>>(path: P, model: &Model) -> Result<()> {
    let bytes = encode_mdb(model)?;
    write_atomic(path.as_ref(), &bytes)
}

fn encode_mesh(mesh: &Mesh) -> Result<(ChunkId, Vec<u8>)> {
    match &mesh.kind {
        MeshKind::Rigid => Ok((PACKET_RIGD, encode_rigid(mesh))),
        MeshKind::Skin { skeleton_name } => {
            Ok((PACKET_SKIN, encode_skin(mesh, skeleton_name)?))
        }
        MeshKind::Collision2 => Ok((PACKET_COL2, encode_collision(mesh))),
        MeshKind::Collision3 => Ok((PACKET_COL3, encode_collision(mesh))),
        MeshKind::Walk => Ok((PACKET_WALK, encode_walk(mesh))),
    }
}

fn encode_material(w: &mut BinaryWriter, material: &Material) {
    w.write_fixed_string(&material.diffuse_map, NAME_SIZE);
    w.write_fixed_string(&material.normal_map, NAME_SIZE);
    w.write_fixed_string(&material.tint_map, NAME_SIZE);
    w.write_fixed_string(&material.glow_map, NAME_SIZE);
    for c in material.diffuse_color {
        w.write_f32(c.clamp(0.0, 1.0));
    }
    for c in material.specular_color {
        w.write_f32(c.clamp(0.0, 1.0));
    }
    w.write_f32(material.glossiness);
    w.write_f32(material.specular_level);
    w.write_u32(material.flags().0);
}

fn write_faces(w: &mut BinaryWriter, mesh: &Mesh) {
    for face in &mesh.faces {
        for &index in face {
            w.write_u16(index);
        }
    }
}

fn encode_rigid(mesh: &Mesh) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&mesh.name, NAME_SIZE);
    encode_material(&mut w, &mesh.material);
    w.write_u32(mesh.vertices.len() as u32);
    w.write_u32(mesh.faces.len() as u32);
    for v in &mesh.vertices {
        w.write_vec3(v.position);
        w.write_vec3(v.normal);
        w.write_vec3(v.tangent);
        w.write_vec3(v.binormal);
        w.write_vec3(v.uv);
    }
    write_faces(&mut w, mesh);
    w.into_bytes()
}

fn encode_skin(mesh: &Mesh, skeleton_name: &str) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&mesh.name, NAME_SIZE);
    w.write_fixed_string(skeleton_name, NAME_SIZE);
    encode_material(&mut w, &mesh.material);
    w.write_u32(mesh.vertices.len() as u32);
    w.write_u32(mesh.faces.len() as u32);
    for (i, v) in mesh.vertices.iter().enumerate() {
        let weights = v.weights.ok_or_else(|| {
            Error::InvalidModel(format!(
                "skin mesh '{}' vertex {} has no bone weights",
                mesh.name, i
            ))
        })?;
        w.write_vec3(v.position);
        w.write_vec3(v.normal);
        for weight in weights.bone_weights {
            w.write_f32(weight);
        }
        for index in weights.bone_indices {
            w.write_u8(index);
        }
        w.write_vec3(v.tangent);
        w.write_vec3(v.binormal);
        w.write_vec3(v.uv);
        // The format always declares the full four influence slots.
        w.write_f32(4.0);
    }
    write_faces(&mut w, mesh);
    Ok(w.into_bytes())
}

fn encode_collision(mesh: &Mesh) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&mesh.name, NAME_SIZE);
    encode_material(&mut w, &mesh.material);
    w.write_u32(mesh.vertices.len() as u32);
    w.write_u32(mesh.faces.len() as u32);
    for v in &mesh.vertices {
        w.write_vec3(v.position);
        w.write_vec3(v.normal);
        w.write_vec3(v.uv);
    }
    write_faces(&mut w, mesh);
    w.into_bytes()
}

fn encode_walk(mesh: &Mesh) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&mesh.name, NAME_SIZE);
    w.write_u32(mesh.walk_ui_flags);
    w.write_u32(mesh.vertices.len() as u32);
    w.write_u32(mesh.faces.len() as u32);
    for v in &mesh.vertices {
        w.write_vec3(v.position);
    }
    for (i, face) in mesh.faces.iter().enumerate() {
        for &index in face {
            w.write_u16(index);
        }
        w.write_u16(mesh.walk_surfaces.get(i).copied().unwrap_or(0));
    }
    w.into_bytes()
}

fn write_orientation(w: &mut BinaryWriter, orientation: &[[f32; 3]; 3]) {
    for row in orientation {
        for &value in row {
            w.write_f32(value);
        }
    }
}

fn encode_hook(hook: &HookPoint) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&hook.name, NAME_SIZE);
    w.write_u16(hook.point_type);
    w.write_u16(hook.point_size);
    w.write_vec3(hook.position);
    write_orientation(&mut w, &hook.orientation);
    w.into_bytes()
}

fn encode_hair(hair: &HairInfo) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&hair.name, NAME_SIZE);
    w.write_u32(hair.shortening_behavior);
    w.write_vec3(hair.position);
    write_orientation(&mut w, &hair.orientation);
    w.into_bytes()
}

fn encode_helm(helm: &HelmInfo) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_fixed_string(&helm.name, NAME_SIZE);
    w.write_u32(helm.hiding_behavior);
    w.write_vec3(helm.position);
    write_orientation(&mut w, &helm.orientation);
    w.into_bytes()
}

fn encode_spheres(spheres: &[CollisionSphere]) -> Vec<u8> {
    let mut w = BinaryWriter::new();
    w.write_u32(spheres.len() as u32);
    for sphere in spheres {
        w.write_u32(sphere.bone_index);
        w.write_f32(sphere.radius);
    }
    w.into_bytes()
}
