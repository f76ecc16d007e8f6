//! Skeleton and bone types

use glam::{Quat, Vec3};

/// A translation/rotation/scale transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };
}

/// One bone: name, parent link, and bind-pose transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Bone {
    pub name: String,
    /// Index of the parent bone, `None` for a root. Always less than the
    /// bone's own index, so iterating the bone table in order visits
    /// parents before children.
    pub parent: Option<u32>,
    pub bind_pose: Transform,
}

impl Bone {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            bind_pose: Transform::IDENTITY,
        }
    }

    pub fn child_of(name: impl Into<String>, parent: u32) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            bind_pose: Transform::IDENTITY,
        }
    }
}

/// An ordered bone table in topological order (parents first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Skeleton {
    pub bones: Vec<Bone>,
}
