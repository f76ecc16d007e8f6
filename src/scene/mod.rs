//! Scene attribute boundary
//!
//! Host applications exchange material state with the codec through a
//! flat key/value attribute bag per scene object, keyed by the fixed
//! `NWN2MDK_*` names the toolchain has always used. Inside the codec the
//! same data is the typed [`Material`](crate::model::Material) struct;
//! the dynamic map exists only at this boundary.

mod adapter;
mod transaction;

pub use adapter::{apply_material, clear_material_attributes, material_from_attributes};
pub use transaction::AttributeTransaction;

use indexmap::IndexMap;

/// The fixed attribute keys, in the order the exporter writes them.
pub mod keys {
    pub const TINT_MAP: &str = "NWN2MDK_TINT_MAP";
    pub const DIFFUSE_COLOR: &str = "NWN2MDK_DIFFUSE_COLOR";
    pub const SPECULAR_COLOR: &str = "NWN2MDK_SPECULAR_COLOR";
    pub const SPECULAR_LEVEL: &str = "NWN2MDK_SPECULAR_LEVEL";
    pub const GLOSSINESS: &str = "NWN2MDK_GLOSSINESS";
    pub const TRANSPARENCY_MASK: &str = "NWN2MDK_TRANSPARENCY_MASK";
    pub const HEAD: &str = "NWN2MDK_HEAD";
    pub const DONT_CAST_SHADOWS: &str = "NWN2MDK_DONT_CAST_SHADOWS";
    pub const ENVIRONMENT_MAP: &str = "NWN2MDK_ENVIRONMENT_MAP";
    pub const GLOW: &str = "NWN2MDK_GLOW";
    pub const PROJECTED_TEXTURES: &str = "NWN2MDK_PROJECTED_TEXTURES";

    /// All eleven keys in write order.
    pub const ALL: [&str; 11] = [
        TINT_MAP,
        DIFFUSE_COLOR,
        SPECULAR_COLOR,
        SPECULAR_LEVEL,
        GLOSSINESS,
        TRANSPARENCY_MASK,
        HEAD,
        DONT_CAST_SHADOWS,
        ENVIRONMENT_MAP,
        GLOW,
        PROJECTED_TEXTURES,
    ];
}

/// One attribute value. Hosts store booleans as 1.0/0.0 floats, so there
/// is no boolean variant.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Float(f32),
    Color([f32; 3]),
}

impl AttributeValue {
    /// Interpret the value as the hosts' float-encoded boolean.
    pub fn as_flag(&self) -> bool {
        matches!(self, AttributeValue::Float(f) if *f == 1.0)
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            _ => None,
        }
    }
}

/// The attribute map of one scene object, in insertion order.
pub type AttributeMap = IndexMap<String, AttributeValue>;

/// A scene object as the codec sees it: a name and its attribute bag.
/// Mesh and armature data travel through the host's native exchange
/// format; only the custom attributes cross here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneObject {
    pub name: String,
    pub attributes: AttributeMap,
}

impl SceneObject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: AttributeMap::new(),
        }
    }
}
