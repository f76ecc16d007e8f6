//! Attachment and placement records
//!
//! Besides geometry, the MDB container carries small fixed-size packets
//! that place things relative to the model: hook points for attaching
//! effects and items, hair and helm behavior markers, and per-bone
//! collision spheres.

use glam::Vec3;

/// An attachment point (`HOOK` packet): a named, oriented position on the
/// model that the engine hangs effects and equipment from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HookPoint {
    pub name: String,
    pub point_type: u16,
    pub point_size: u16,
    pub position: Vec3,
    /// Row-major 3x3 basis.
    pub orientation: [[f32; 3]; 3],
}

/// Hair placement marker (`HAIR` packet).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HairInfo {
    pub name: String,
    /// How the engine shortens hair under headgear; see the
    /// `HAIR_SHORTEN_*` constants.
    pub shortening_behavior: u32,
    pub position: Vec3,
    /// Row-major 3x3 basis.
    pub orientation: [[f32; 3]; 3],
}

/// Hair shortening behaviors stored in [`HairInfo`].
pub const HAIR_SHORTEN_LOW: u32 = 0;
pub const HAIR_SHORTEN_SHORT: u32 = 1;
pub const HAIR_SHORTEN_PONYTAIL: u32 = 2;

/// Helm placement marker (`HELM` packet).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HelmInfo {
    pub name: String,
    /// Which hair geometry the helm hides; see the `HELM_HIDE_*`
    /// constants.
    pub hiding_behavior: u32,
    pub position: Vec3,
    /// Row-major 3x3 basis.
    pub orientation: [[f32; 3]; 3],
}

/// Hair hiding behaviors stored in [`HelmInfo`].
pub const HELM_HIDE_NONE: u32 = 0;
pub const HELM_HIDE_HAIR: u32 = 1;
pub const HELM_HIDE_PARTIAL_HAIR: u32 = 2;
pub const HELM_HIDE_HEAD: u32 = 3;

/// One collision sphere (`COLS` packet entry), bound to a skeleton bone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CollisionSphere {
    pub bone_index: u32,
    pub radius: f32,
}
