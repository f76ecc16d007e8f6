//! Attribute-bag <-> material conversion

use super::{AttributeMap, AttributeValue, keys};
use crate::model::Material;

/// Build a [`Material`] from a scene object's attribute bag.
///
/// Missing keys fall back to the toolset defaults (white colors,
/// specular level 1.0, glossiness 20.0, all flags off). Keys outside the
/// known set are ignored; hosts attach plenty of their own metadata.
pub fn material_from_attributes(attributes: &AttributeMap) -> Material {
    let mut material = Material::default();

    if let Some(AttributeValue::Text(map)) = attributes.get(keys::TINT_MAP) {
        material.tint_map = map.clone();
    }
    if let Some(AttributeValue::Color(color)) = attributes.get(keys::DIFFUSE_COLOR) {
        material.diffuse_color = *color;
    }
    if let Some(AttributeValue::Color(color)) = attributes.get(keys::SPECULAR_COLOR) {
        material.specular_color = *color;
    }
    if let Some(level) = attributes.get(keys::SPECULAR_LEVEL).and_then(AttributeValue::as_float) {
        material.specular_level = level;
    }
    if let Some(gloss) = attributes.get(keys::GLOSSINESS).and_then(AttributeValue::as_float) {
        material.glossiness = gloss;
    }

    material.transparency_mask = flag(attributes, keys::TRANSPARENCY_MASK);
    material.head = flag(attributes, keys::HEAD);
    material.cast_no_shadows = flag(attributes, keys::DONT_CAST_SHADOWS);
    material.environment_map = flag(attributes, keys::ENVIRONMENT_MAP);
    material.glow = flag(attributes, keys::GLOW);
    material.projected_textures = flag(attributes, keys::PROJECTED_TEXTURES);

    material
}

/// Write a material into an attribute bag.
///
/// All eleven keys are written unconditionally, defaults included, so a
/// re-imported object always carries the full authorable set.
pub fn apply_material(attributes: &mut AttributeMap, material: &Material) {
    attributes.insert(
        keys::TINT_MAP.into(),
        AttributeValue::Text(material.tint_map.clone()),
    );
    attributes.insert(
        keys::DIFFUSE_COLOR.into(),
        AttributeValue::Color(material.diffuse_color),
    );
    attributes.insert(
        keys::SPECULAR_COLOR.into(),
        AttributeValue::Color(material.specular_color),
    );
    attributes.insert(
        keys::SPECULAR_LEVEL.into(),
        AttributeValue::Float(material.specular_level),
    );
    attributes.insert(
        keys::GLOSSINESS.into(),
        AttributeValue::Float(material.glossiness),
    );
    attributes.insert(
        keys::TRANSPARENCY_MASK.into(),
        bool_value(material.transparency_mask),
    );
    attributes.insert(keys::HEAD.into(), bool_value(material.head));
    attributes.insert(
        keys::DONT_CAST_SHADOWS.into(),
        bool_value(material.cast_no_shadows),
    );
    attributes.insert(
        keys::ENVIRONMENT_MAP.into(),
        bool_value(material.environment_map),
    );
    attributes.insert(keys::GLOW.into(), bool_value(material.glow));
    attributes.insert(
        keys::PROJECTED_TEXTURES.into(),
        bool_value(material.projected_textures),
    );
}

/// Remove the material attribute set from a bag, leaving any host-owned
/// keys alone. Returns how many keys were present.
pub fn clear_material_attributes(attributes: &mut AttributeMap) -> usize {
    let mut removed = 0;
    for key in keys::ALL {
        if attributes.shift_remove(key).is_some() {
            removed += 1;
        }
    }
    removed
}

fn flag(attributes: &AttributeMap, key: &str) -> bool {
    attributes.get(key).is_some_and(AttributeValue::as_flag)
}

fn bool_value(value: bool) -> AttributeValue {
    AttributeValue::Float(if value { 1.0 } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneObject;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_bag_yields_defaults() {
        let object = SceneObject::new("torso");
        let material = material_from_attributes(&object.attributes);
        assert_eq!(material, Material::default());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut object = SceneObject::new("torso");
        object.attributes.insert(
            "cycles_visibility".into(),
            AttributeValue::Float(1.0),
        );
        object
            .attributes
            .insert(keys::GLOSSINESS.into(), AttributeValue::Float(55.0));
        let material = material_from_attributes(&object.attributes);
        assert_eq!(material.glossiness, 55.0);
        assert!(!material.glow);
    }

    #[test]
    fn apply_writes_every_key() {
        let mut object = SceneObject::new("torso");
        apply_material(&mut object.attributes, &Material::default());
        for key in keys::ALL {
            assert!(object.attributes.contains_key(key), "missing {key}");
        }
        assert_eq!(object.attributes.len(), keys::ALL.len());
    }

    #[test]
    fn material_round_trips_through_attributes() {
        let material = Material {
            tint_map: "c_tint".into(),
            diffuse_color: [0.5, 0.25, 0.125],
            specular_color: [0.9, 0.9, 0.8],
            specular_level: 2.5,
            glossiness: 80.0,
            head: true,
            glow: true,
            ..Material::default()
        };
        let mut attributes = AttributeMap::new();
        apply_material(&mut attributes, &material);
        assert_eq!(material_from_attributes(&attributes), material);
    }

    #[test]
    fn clear_removes_only_material_keys() {
        let mut attributes = AttributeMap::new();
        attributes.insert("host_key".into(), AttributeValue::Float(3.0));
        apply_material(&mut attributes, &Material::default());
        let removed = clear_material_attributes(&mut attributes);
        assert_eq!(removed, keys::ALL.len());
        assert_eq!(attributes.len(), 1);
        assert!(attributes.contains_key("host_key"));
    }

    #[test]
    fn flag_requires_exact_one() {
        let mut attributes = AttributeMap::new();
        attributes.insert(keys::GLOW.into(), AttributeValue::Float(0.0));
        assert!(!material_from_attributes(&attributes).glow);
        attributes.insert(keys::GLOW.into(), AttributeValue::Float(1.0));
        assert!(material_from_attributes(&attributes).glow);
    }
}
