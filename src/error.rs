//! Error types for `nwn2kit`

use std::path::PathBuf;

use thiserror::Error;

use crate::formats::common::ChunkId;

/// The error type for `nwn2kit` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Container Errors ====================
    /// The file does not carry a recognized model container signature.
    #[error("invalid signature: expected {expected}, found {found:02x?}")]
    InvalidSignature {
        /// Human-readable name of the expected signature.
        expected: &'static str,
        /// The bytes actually found at the signature position.
        found: [u8; 4],
    },

    /// The container version is not supported.
    #[error("unsupported {format} version: {version}")]
    UnsupportedVersion {
        /// The container format name.
        format: &'static str,
        /// The version number found in the file.
        version: u32,
    },

    /// A read ran past the end of the input buffer.
    #[error("truncated input: need {needed} bytes at offset {offset}, only {available} available")]
    TruncatedInput {
        /// Byte offset at which the read was attempted.
        offset: usize,
        /// Number of bytes the read required.
        needed: usize,
        /// Number of bytes remaining in the buffer.
        available: usize,
    },

    /// A section carries a compression tag the codec does not recognize.
    #[error("unsupported compression method {method} in chunk {chunk}")]
    UnsupportedCompression {
        /// The compression tag found in the section descriptor.
        method: u32,
        /// The chunk the section belongs to.
        chunk: ChunkId,
    },

    /// A chunk's declared contents do not fit its byte range, or its
    /// payload is internally inconsistent.
    #[error("corrupt chunk {chunk} at offset {offset}: {message}")]
    CorruptChunk {
        /// The chunk identifier.
        chunk: ChunkId,
        /// Byte offset of the chunk within the file.
        offset: usize,
        /// Description of the inconsistency.
        message: String,
    },

    /// A vertex declares more bone influences than the format ceiling of 4.
    #[error("unsupported vertex format: {influences} bone influences (maximum 4)")]
    UnsupportedVertexFormat {
        /// The declared influence count.
        influences: u32,
    },

    /// A bone references a parent at or after its own position, breaking
    /// the topological order the skeleton guarantees.
    #[error("invalid bone hierarchy: bone '{bone}' (index {index}) has parent index {parent}")]
    InvalidBoneHierarchy {
        /// Name of the offending bone.
        bone: String,
        /// The bone's own index in the bone table.
        index: u32,
        /// The out-of-order parent index.
        parent: i32,
    },

    // ==================== Model Errors ====================
    /// A fully decoded model violates a structural invariant.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The requested output format cannot be determined or is unknown.
    #[error("unsupported output format: {0}")]
    UnsupportedOutputFormat(String),

    // ==================== Output Errors ====================
    /// Writing or publishing the output file failed. The destination is
    /// left untouched.
    #[error("failed to write output {path}: {message}")]
    OutputWrite {
        /// The intended output path.
        path: PathBuf,
        /// The underlying failure.
        message: String,
    },

    // ==================== Compression Errors ====================
    /// Zlib decompression failed.
    #[error("zlib decompression failed: {message}")]
    ZlibDecompressionFailed {
        /// The error message.
        message: String,
    },

    /// LZ4 decompression failed.
    #[error("LZ4 decompression failed: {message}")]
    Lz4DecompressionFailed {
        /// The error message.
        message: String,
    },
}

/// A specialized Result type for `nwn2kit` operations.
pub type Result<T> = std::result::Result<T, Error>;
