//! Model conversion between containers
//!
//! One conversion decodes each input, merges the results into a single
//! in-memory [`Model`], validates it, and encodes the output format the
//! destination extension implies. The work is synchronous and touches no
//! shared state, so callers may run conversions in parallel if they
//! want.

use std::path::{Path, PathBuf};

use crate::compression::Compression;
use crate::error::{Error, Result};
use crate::formats::{
    gr2::{self, GR2_MAGIC},
    mdb::{self, MDB_SIGNATURE},
};
use crate::model::Model;

/// Knobs for one conversion run.
#[derive(Debug, Clone, Copy)]
pub struct ConvertOptions {
    /// Compression for GR2 output sections. MDB output ignores this; the
    /// legacy container is always stored.
    pub compression: Compression,
    /// Run [`Model::validate`] on the merged model before encoding.
    pub validate: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            compression: Compression::Zlib,
            validate: true,
        }
    }
}

/// What one input contributed to the merged model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputReport {
    pub path: PathBuf,
    pub format: ModelFormat,
    pub meshes: usize,
    pub bones: usize,
    pub animations: usize,
    pub preserved_chunks: usize,
}

/// Summary of a whole conversion, one entry per input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertReport {
    pub inputs: Vec<InputReport>,
    pub output: PathBuf,
}

/// The two on-disk containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Mdb,
    Gr2,
}

impl std::fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelFormat::Mdb => write!(f, "MDB"),
            ModelFormat::Gr2 => write!(f, "GR2"),
        }
    }
}

/// Identify a container from its leading bytes, falling back to the file
/// extension when the buffer is too short to tell.
pub fn detect_format(path: &Path, data: &[u8]) -> Result<ModelFormat> {
    if data.len() >= 4 {
        let magic = [data[0], data[1], data[2], data[3]];
        if magic == MDB_SIGNATURE {
            return Ok(ModelFormat::Mdb);
        }
        if magic == GR2_MAGIC {
            return Ok(ModelFormat::Gr2);
        }
    }
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mdb") => Ok(ModelFormat::Mdb),
        Some(ext) if ext.eq_ignore_ascii_case("gr2") => Ok(ModelFormat::Gr2),
        _ => Err(Error::InvalidSignature {
            expected: "NWN2 or GR2",
            found: [
                data.first().copied().unwrap_or(0),
                data.get(1).copied().unwrap_or(0),
                data.get(2).copied().unwrap_or(0),
                data.get(3).copied().unwrap_or(0),
            ],
        }),
    }
}

/// Pick the output container from the destination extension.
pub fn output_format(path: &Path) -> Result<ModelFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mdb") => Ok(ModelFormat::Mdb),
        Some(ext) if ext.eq_ignore_ascii_case("gr2") => Ok(ModelFormat::Gr2),
        Some(other) => Err(Error::UnsupportedOutputFormat(other.to_string())),
        None => Err(Error::UnsupportedOutputFormat(
            path.display().to_string(),
        )),
    }
}

/// Read one model file, dispatching on content.
pub fn read_model<P: AsRef<Path>>(path: P) -> Result<Model> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    match detect_format(path, &data)? {
        ModelFormat::Mdb => {
            let mut model = mdb::parse_mdb_bytes(&data)?;
            if model.name.is_empty() {
                model.name = stem_name(path);
            }
            Ok(model)
        }
        ModelFormat::Gr2 => gr2::parse_gr2_bytes(&data),
    }
}

/// Write one model file in the container the extension implies, published
/// atomically.
pub fn write_model<P: AsRef<Path>>(path: P, model: &Model, options: ConvertOptions) -> Result<()> {
    let path = path.as_ref();
    match output_format(path)? {
        ModelFormat::Mdb => mdb::write_mdb(path, model),
        ModelFormat::Gr2 => gr2::write_gr2(path, model, options.compression),
    }
}

/// Convert any mix of inputs into one output file.
///
/// Geometry comes from MDB inputs, skeleton and animations from GR2
/// inputs; later inputs append to earlier ones. The output lands only if
/// every step succeeds.
pub fn convert(inputs: &[PathBuf], output: &Path, options: ConvertOptions) -> Result<ConvertReport> {
    if inputs.is_empty() {
        return Err(Error::InvalidModel("no input files given".into()));
    }
    // Fail on a bad destination before doing any decode work.
    let _ = output_format(output)?;

    let mut merged = Model::default();
    let mut report = ConvertReport {
        inputs: Vec::with_capacity(inputs.len()),
        output: output.to_path_buf(),
    };

    for input in inputs {
        let data = std::fs::read(input)?;
        let format = detect_format(input, &data)?;
        let model = match format {
            ModelFormat::Mdb => mdb::parse_mdb_bytes(&data)?,
            ModelFormat::Gr2 => gr2::parse_gr2_bytes(&data)?,
        };
        tracing::info!(
            "read {} ({format}): {} meshes, {} animations",
            input.display(),
            model.meshes.len(),
            model.animations.len()
        );
        report.inputs.push(InputReport {
            path: input.clone(),
            format,
            meshes: model.meshes.len(),
            bones: model.skeleton.as_ref().map_or(0, |s| s.bones.len()),
            animations: model.animations.len(),
            preserved_chunks: model.extra_chunks.len(),
        });
        merged.merge(model);
    }

    if merged.name.is_empty() {
        merged.name = stem_name(output);
    }
    if options.validate {
        merged.validate()?;
    }

    write_model(output, &merged, options)?;
    tracing::info!("wrote {}", output.display());
    Ok(report)
}

fn stem_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bone, Mesh, MeshKind, Skeleton, Vertex};
    use glam::Vec3;
    use pretty_assertions::assert_eq;

    fn triangle_mesh(name: &str) -> Mesh {
        let mut mesh = Mesh::new(name, MeshKind::Rigid);
        for i in 0..3 {
            mesh.vertices.push(Vertex {
                position: Vec3::new(i as f32, 0.0, 0.0),
                normal: Vec3::Z,
                ..Vertex::default()
            });
        }
        mesh.faces.push([0, 1, 2]);
        mesh
    }

    #[test]
    fn detect_prefers_magic_over_extension() {
        let mut model = Model::new("thing");
        model.meshes.push(triangle_mesh("body"));
        let bytes = mdb::encode_mdb(&model).unwrap();
        // Misleading extension does not fool the sniffer.
        let format = detect_format(Path::new("thing.gr2"), &bytes).unwrap();
        assert_eq!(format, ModelFormat::Mdb);
    }

    #[test]
    fn detect_falls_back_to_extension_for_empty_file() {
        assert_eq!(
            detect_format(Path::new("thing.mdb"), &[]).unwrap(),
            ModelFormat::Mdb
        );
        assert!(detect_format(Path::new("thing.txt"), &[]).is_err());
    }

    #[test]
    fn unsupported_output_extension_is_rejected() {
        assert!(matches!(
            output_format(Path::new("out.obj")),
            Err(Error::UnsupportedOutputFormat(_))
        ));
    }

    #[test]
    fn merge_combines_mdb_and_gr2_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mdb_path = dir.path().join("body.mdb");
        let gr2_path = dir.path().join("body.gr2");
        let out_path = dir.path().join("merged.gr2");

        let mut geometry = Model::new("body");
        geometry.meshes.push(triangle_mesh("torso"));
        mdb::write_mdb(&mdb_path, &geometry).unwrap();

        let mut rig = Model::new("body");
        rig.skeleton = Some(Skeleton {
            bones: vec![Bone::root("base")],
        });
        gr2::write_gr2(&gr2_path, &rig, Compression::None).unwrap();

        let report = convert(
            &[mdb_path.clone(), gr2_path.clone()],
            &out_path,
            ConvertOptions::default(),
        )
        .unwrap();

        assert_eq!(report.inputs.len(), 2);
        assert_eq!(report.inputs[0].meshes, 1);
        assert_eq!(report.inputs[1].bones, 1);

        // GR2 output drops meshes by design; the rig survives.
        let merged = read_model(&out_path).unwrap();
        assert_eq!(merged.skeleton.as_ref().unwrap().bones.len(), 1);
    }

    #[test]
    fn mdb_chunks_do_not_leak_into_gr2_output() {
        let dir = tempfile::tempdir().unwrap();
        let mdb_path = dir.path().join("area.mdb");
        let out_path = dir.path().join("area.gr2");

        let mut model = Model::new("area");
        model.meshes.push(triangle_mesh("ground"));
        model.extra_chunks.push(crate::model::RawChunk {
            id: crate::formats::common::ChunkId::new(b"TRRN"),
            data: vec![9; 16],
            source: crate::model::ChunkSource::Mdb,
        });
        mdb::write_mdb(&mdb_path, &model).unwrap();

        convert(&[mdb_path], &out_path, ConvertOptions::default()).unwrap();

        let data = std::fs::read(&out_path).unwrap();
        let sections = gr2::index_sections(&data).unwrap();
        assert!(sections.iter().all(|s| s.id != crate::formats::common::ChunkId::new(b"TRRN")));
    }

    #[test]
    fn failed_conversion_leaves_no_output() {
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("out.mdb");
        let missing = dir.path().join("absent.mdb");
        assert!(convert(&[missing], &out_path, ConvertOptions::default()).is_err());
        assert!(!out_path.exists());
    }

    #[test]
    fn validation_catches_out_of_range_face() {
        let dir = tempfile::tempdir().unwrap();
        let mdb_path = dir.path().join("bad.mdb");
        let out_path = dir.path().join("out.mdb");

        let mut model = Model::new("bad");
        let mut mesh = triangle_mesh("torso");
        mesh.faces.push([0, 1, 9]);
        model.meshes.push(mesh);
        // Encode directly; validation happens on convert, not encode.
        mdb::write_mdb(&mdb_path, &model).unwrap();

        assert!(matches!(
            convert(&[mdb_path.clone()], &out_path, ConvertOptions::default()),
            Err(Error::InvalidModel(_))
        ));

        let lax = ConvertOptions {
            validate: false,
            ..ConvertOptions::default()
        };
        convert(&[mdb_path], &out_path, lax).unwrap();
        assert!(out_path.exists());
    }
}
