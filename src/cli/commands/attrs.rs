//! Attrs command
//!
//! Shows each mesh material as the attribute set a scene host would see.

use std::path::Path;

use crate::convert::read_model;
use crate::scene::{AttributeValue, apply_material};

pub fn execute(path: &Path) -> anyhow::Result<()> {
    let model = read_model(path)?;

    if model.meshes.is_empty() {
        println!("{}: no meshes", path.display());
        return Ok(());
    }

    for mesh in &model.meshes {
        println!("{}:", mesh.name);
        let mut attributes = crate::scene::AttributeMap::new();
        apply_material(&mut attributes, &mesh.material);
        for (key, value) in &attributes {
            match value {
                AttributeValue::Text(s) => println!("  {key} = \"{s}\""),
                AttributeValue::Float(f) => println!("  {key} = {f}"),
                AttributeValue::Color([r, g, b]) => {
                    println!("  {key} = ({r}, {g}, {b})");
                }
            }
        }
        println!();
    }

    Ok(())
}
