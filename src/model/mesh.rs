//! Mesh and vertex types

use glam::Vec3;

use super::Material;

/// The geometry packet families of the legacy MDB container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshKind {
    /// Static render geometry (`RIGD`).
    Rigid,
    /// Skinned render geometry (`SKIN`), bound to a named skeleton.
    Skin { skeleton_name: String },
    /// Collision geometry, coarse (`COL2`).
    Collision2,
    /// Collision geometry, fine (`COL3`).
    Collision3,
    /// Walkability mesh (`WALK`). Positions only; per-face surface flags
    /// ride in [`Mesh::walk_surfaces`].
    Walk,
}

/// Up to four bone influences for one skinned vertex.
///
/// Unused slots carry a zero weight; indices with zero weight are not
/// required to reference a real bone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct VertexWeights {
    pub bone_indices: [u8; 4],
    pub bone_weights: [f32; 4],
}

/// One vertex. Fields the mesh kind does not store are left at their
/// defaults and are not written back out.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tangent: Vec3,
    pub binormal: Vec3,
    /// Texture coordinate; the third component is carried by the format.
    pub uv: Vec3,
    pub weights: Option<VertexWeights>,
}

/// An ordered triangle mesh with a material reference.
///
/// Face indices are 0-based and index into `vertices`.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub kind: MeshKind,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<[u16; 3]>,
    pub material: Material,
    /// Walk meshes only: one surface flag word per face.
    pub walk_surfaces: Vec<u16>,
    /// Walk meshes only: UI flag word from the packet header.
    pub walk_ui_flags: u32,
}

impl Mesh {
    pub fn new(name: impl Into<String>, kind: MeshKind) -> Self {
        Self {
            name: name.into(),
            kind,
            vertices: Vec::new(),
            faces: Vec::new(),
            material: Material::default(),
            walk_surfaces: Vec::new(),
            walk_ui_flags: 0,
        }
    }

    /// Whether this mesh kind carries skinning data.
    pub fn is_skinned(&self) -> bool {
        matches!(self.kind, MeshKind::Skin { .. })
    }
}
