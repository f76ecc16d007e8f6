//! In-memory model representation
//!
//! A [`Model`] is fully populated by one decode pass and read back out by
//! an explicit encode step; the codec never mutates a model in place or
//! streams partial state.

mod animation;
mod material;
mod mesh;
mod placement;
mod skeleton;

pub use animation::{Animation, Keyframe, Track};
pub use material::{Material, MaterialFlags};
pub use mesh::{Mesh, MeshKind, Vertex, VertexWeights};
pub use placement::{
    CollisionSphere, HAIR_SHORTEN_LOW, HAIR_SHORTEN_PONYTAIL, HAIR_SHORTEN_SHORT,
    HELM_HIDE_HAIR, HELM_HIDE_HEAD, HELM_HIDE_NONE, HELM_HIDE_PARTIAL_HAIR, HairInfo,
    HelmInfo, HookPoint,
};
pub use skeleton::{Bone, Skeleton, Transform};

use crate::error::{Error, Result};
use crate::formats::common::ChunkId;

/// Which container a preserved chunk came from. An encoder only re-emits
/// chunks native to its own container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkSource {
    Mdb,
    Gr2,
}

/// A chunk the codec does not interpret, preserved byte-for-byte so a
/// re-encode emits it unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct RawChunk {
    pub id: ChunkId,
    pub data: Vec<u8>,
    pub source: ChunkSource,
}

/// Top-level model container.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub name: String,
    pub meshes: Vec<Mesh>,
    pub skeleton: Option<Skeleton>,
    pub animations: Vec<Animation>,
    pub hook_points: Vec<HookPoint>,
    pub hair_info: Vec<HairInfo>,
    pub helm_info: Vec<HelmInfo>,
    pub collision_spheres: Vec<CollisionSphere>,
    /// Unknown chunks carried through for round-trip fidelity.
    pub extra_chunks: Vec<RawChunk>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Check the cross-structure invariants of a fully populated model.
    ///
    /// # Errors
    /// Returns [`Error::InvalidModel`] if a face references a vertex that
    /// does not exist, or a skin vertex references a bone outside the
    /// skeleton's bone table.
    pub fn validate(&self) -> Result<()> {
        for mesh in &self.meshes {
            let vertex_count = mesh.vertices.len();
            for (i, face) in mesh.faces.iter().enumerate() {
                for &index in face {
                    if usize::from(index) >= vertex_count {
                        return Err(Error::InvalidModel(format!(
                            "mesh '{}' face {} references vertex {} of {}",
                            mesh.name, i, index, vertex_count
                        )));
                    }
                }
            }

            if mesh.is_skinned() {
                for (i, vertex) in mesh.vertices.iter().enumerate() {
                    if vertex.weights.is_none() {
                        return Err(Error::InvalidModel(format!(
                            "skin mesh '{}' vertex {} has no bone weights",
                            mesh.name, i
                        )));
                    }
                }
            }

            if let Some(skeleton) = &self.skeleton {
                let bone_count = skeleton.bones.len();
                for (i, vertex) in mesh.vertices.iter().enumerate() {
                    let Some(weights) = &vertex.weights else {
                        continue;
                    };
                    for (&bone, &weight) in
                        weights.bone_indices.iter().zip(&weights.bone_weights)
                    {
                        if weight > 0.0 && usize::from(bone) >= bone_count {
                            return Err(Error::InvalidModel(format!(
                                "mesh '{}' vertex {} is weighted to bone {} \
                                 but the skeleton has {} bones",
                                mesh.name, i, bone, bone_count
                            )));
                        }
                    }
                }
            }
        }

        if let Some(skeleton) = &self.skeleton {
            let bone_count = skeleton.bones.len();
            for (i, sphere) in self.collision_spheres.iter().enumerate() {
                if sphere.bone_index as usize >= bone_count {
                    return Err(Error::InvalidModel(format!(
                        "collision sphere {} references bone {} but the \
                         skeleton has {} bones",
                        i, sphere.bone_index, bone_count
                    )));
                }
            }
        }

        for animation in &self.animations {
            animation.validate(self.skeleton.as_ref())?;
        }

        Ok(())
    }

    /// Fold another decoded model into this one.
    ///
    /// Geometry accumulates; the skeleton and name are taken from the
    /// first input that provides them. Used when one conversion reads an
    /// MDB geometry file alongside its GR2 skeleton file.
    pub fn merge(&mut self, other: Model) {
        if self.name.is_empty() {
            self.name = other.name;
        }
        self.meshes.extend(other.meshes);
        if self.skeleton.is_none() {
            self.skeleton = other.skeleton;
        }
        self.animations.extend(other.animations);
        self.hook_points.extend(other.hook_points);
        self.hair_info.extend(other.hair_info);
        self.helm_info.extend(other.helm_info);
        self.collision_spheres.extend(other.collision_spheres);
        self.extra_chunks.extend(other.extra_chunks);
    }
}
