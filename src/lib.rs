//! # nwn2kit
//!
//! A pure-Rust library for working with Neverwinter Nights 2 model files.
//!
//! ## Supported Formats
//!
//! - **MDB** - Monolithic geometry container (rigid, skinned, collision,
//!   and walk meshes with their materials)
//! - **GR2** - Sectioned skeleton/animation container with per-section
//!   compression
//!
//! ## Quick Start
//!
//! ### Reading and converting models
//!
//! ```no_run
//! use nwn2kit::convert::{convert, read_model, ConvertOptions};
//! use std::path::PathBuf;
//!
//! // Inspect a model in memory
//! let model = read_model("c_wolf.mdb")?;
//! println!("{} meshes", model.meshes.len());
//!
//! // Merge geometry and rig into one GR2
//! let inputs = vec![PathBuf::from("c_wolf.mdb"), PathBuf::from("c_wolf_skel.gr2")];
//! convert(&inputs, "c_wolf_out.gr2".as_ref(), ConvertOptions::default())?;
//! # Ok::<(), nwn2kit::Error>(())
//! ```
//!
//! ### Using the Prelude
//!
//! ```
//! use nwn2kit::prelude::*;
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` - Enables the `nwn2kit` command-line binary

pub mod compression;
pub mod convert;
pub mod error;
pub mod formats;
pub mod model;
pub mod scene;
pub mod utils;

// Re-exports for convenience
pub use error::{Error, Result};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::compression::Compression;
    pub use crate::convert::{ConvertOptions, ConvertReport, convert, read_model, write_model};
    pub use crate::error::{Error, Result};
    pub use crate::formats::common::ChunkId;
    pub use crate::formats::gr2::{parse_gr2_bytes, read_gr2, write_gr2};
    pub use crate::formats::mdb::{parse_mdb_bytes, read_mdb, write_mdb};
    pub use crate::model::{
        Animation, Bone, ChunkSource, CollisionSphere, HairInfo, HelmInfo, HookPoint, Keyframe,
        Material, Mesh, MeshKind, Model, RawChunk, Skeleton, Track, Transform, Vertex,
    };
    pub use crate::scene::{
        AttributeTransaction, AttributeValue, SceneObject, apply_material,
        clear_material_attributes, material_from_attributes,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// CLI module (feature-gated)
#[cfg(feature = "cli")]
pub mod cli;
