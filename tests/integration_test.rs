use nwn2kit::prelude::*;
use std::path::PathBuf;
use tempfile::tempdir;

use glam::Vec3;
use nwn2kit::model::VertexWeights;

fn skinned_model() -> Model {
    let mut model = Model::new("c_wolf");
    let mut mesh = Mesh::new("body", MeshKind::Skin {
        skeleton_name: "c_wolf_skel".into(),
    });
    for i in 0..3 {
        mesh.vertices.push(Vertex {
            position: Vec3::new(i as f32, 0.0, 0.0),
            normal: Vec3::Z,
            uv: Vec3::new(i as f32 * 0.5, 0.0, 0.0),
            weights: Some(VertexWeights {
                bone_indices: [0, 1, 0, 0],
                bone_weights: [0.75, 0.25, 0.0, 0.0],
            }),
            ..Vertex::default()
        });
    }
    mesh.faces.push([0, 1, 2]);
    mesh.material.tint_map = "c_wolf_t".into();
    mesh.material.glossiness = 35.0;
    model.meshes.push(mesh);
    model.skeleton = Some(Skeleton {
        bones: vec![Bone::root("base"), Bone::child_of("spine", 0)],
    });
    model.hook_points.push(HookPoint {
        name: "HP_head".into(),
        point_type: 1,
        point_size: 1,
        position: Vec3::new(0.0, 0.0, 1.8),
        orientation: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    });
    model.collision_spheres.push(CollisionSphere {
        bone_index: 1,
        radius: 0.25,
    });
    model.animations.push(Animation {
        name: "walk".into(),
        duration: 1.0,
        tracks: vec![Track {
            bone: 1,
            keys: vec![
                Keyframe {
                    time: 0.0,
                    translation: Vec3::ZERO,
                    rotation: glam::Quat::IDENTITY,
                    scale: Vec3::ONE,
                },
                Keyframe {
                    time: 1.0,
                    translation: Vec3::new(0.0, 1.0, 0.0),
                    rotation: glam::Quat::IDENTITY,
                    scale: Vec3::ONE,
                },
            ],
        }],
    });
    model
}

#[test]
fn full_model_round_trips_through_both_containers() {
    let dir = tempdir().unwrap();
    let mdb_path = dir.path().join("c_wolf.mdb");
    let gr2_path = dir.path().join("c_wolf_skel.gr2");

    let model = skinned_model();
    write_mdb(&mdb_path, &model).unwrap();
    write_gr2(&gr2_path, &model, Compression::Zlib).unwrap();

    let geometry = read_mdb(&mdb_path).unwrap();
    assert_eq!(geometry.meshes, model.meshes);
    assert_eq!(geometry.hook_points, model.hook_points);
    assert_eq!(geometry.collision_spheres, model.collision_spheres);

    let rig = read_gr2(&gr2_path).unwrap();
    assert_eq!(rig.skeleton, model.skeleton);
    assert_eq!(rig.animations, model.animations);
}

#[test]
fn convert_merges_geometry_and_rig() {
    let dir = tempdir().unwrap();
    let mdb_path = dir.path().join("c_wolf.mdb");
    let gr2_path = dir.path().join("c_wolf_skel.gr2");
    let out_path = dir.path().join("c_wolf_out.mdb");

    let model = skinned_model();
    write_mdb(&mdb_path, &model).unwrap();
    write_gr2(&gr2_path, &model, Compression::Lz4).unwrap();

    let inputs = vec![mdb_path, gr2_path];
    let report = convert(&inputs, &out_path, ConvertOptions::default()).unwrap();
    assert_eq!(report.inputs.len(), 2);
    assert_eq!(report.inputs[0].meshes, 1);
    assert_eq!(report.inputs[1].animations, 1);

    let merged = read_model(&out_path).unwrap();
    assert_eq!(merged.meshes.len(), 1);
}

#[test]
fn convert_to_missing_directory_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let mdb_path = dir.path().join("c_wolf.mdb");
    write_mdb(&mdb_path, &skinned_model()).unwrap();

    let out_path: PathBuf = dir.path().join("no_such_dir").join("out.mdb");
    let result = convert(&[mdb_path], &out_path, ConvertOptions::default());
    assert!(matches!(result, Err(Error::OutputWrite { .. })));
    assert!(!out_path.exists());
}

#[test]
fn aborted_attribute_edit_restores_prior_state() {
    let mut object = SceneObject::new("body");
    apply_material(&mut object.attributes, &Material::default());
    let before = object.attributes.clone();

    let edited = Material {
        glow: true,
        glossiness: 90.0,
        ..Material::default()
    };
    {
        let mut tx = AttributeTransaction::begin(&mut object);
        apply_material(tx.attributes(), &edited);
        // Dropped without commit: the import failed partway.
    }
    assert_eq!(object.attributes, before);

    let mut tx = AttributeTransaction::begin(&mut object);
    apply_material(tx.attributes(), &edited);
    tx.commit();
    assert_eq!(material_from_attributes(&object.attributes), edited);
}

#[test]
fn materials_survive_mdb_and_attribute_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("c_wolf.mdb");
    let model = skinned_model();
    write_mdb(&path, &model).unwrap();

    let decoded = read_mdb(&path).unwrap();
    let mut object = SceneObject::new(&decoded.meshes[0].name);
    apply_material(&mut object.attributes, &decoded.meshes[0].material);
    let back = material_from_attributes(&object.attributes);

    assert_eq!(back.tint_map, "c_wolf_t");
    assert_eq!(back.glossiness, 35.0);
}
