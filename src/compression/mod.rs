//! Compression utilities for GR2 container sections
//!
//! Section payloads may be stored raw, zlib-compressed, or LZ4-compressed.
//! The tag values are part of the on-disk format; any other tag is
//! rejected rather than guessed at.

use std::io::{Read, Write};

use crate::error::{Error, Result};
use crate::formats::common::ChunkId;

/// Section compression method, as stored in the section descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    #[default]
    None,
    Zlib,
    Lz4,
}

impl Compression {
    pub fn tag(self) -> u32 {
        match self {
            Compression::None => 0,
            Compression::Zlib => 1,
            Compression::Lz4 => 2,
        }
    }

    /// Decode a descriptor tag, failing on unrecognized values.
    pub fn from_tag(tag: u32, chunk: ChunkId) -> Result<Self> {
        match tag {
            0 => Ok(Compression::None),
            1 => Ok(Compression::Zlib),
            2 => Ok(Compression::Lz4),
            method => Err(Error::UnsupportedCompression { method, chunk }),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Compression::None => "none",
            Compression::Zlib => "zlib",
            Compression::Lz4 => "lz4",
        }
    }
}

impl std::str::FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "raw" | "stored" => Ok(Compression::None),
            "zlib" | "deflate" => Ok(Compression::Zlib),
            "lz4" => Ok(Compression::Lz4),
            _ => Err(format!("invalid compression '{s}'. Valid values: none, zlib, lz4")),
        }
    }
}

/// Compress a section payload with the given method.
pub fn compress(data: &[u8], method: Compression) -> Result<Vec<u8>> {
    match method {
        Compression::None => Ok(data.to_vec()),
        Compression::Zlib => {
            let mut encoder =
                flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(data)?;
            Ok(encoder.finish()?)
        }
        Compression::Lz4 => Ok(lz4_flex::compress(data)),
    }
}

/// Decompress a section payload.
///
/// `decompressed_size` comes from the section descriptor and is an exact
/// contract: output of any other length means the section is corrupt.
pub fn decompress(
    data: &[u8],
    method: Compression,
    decompressed_size: usize,
) -> Result<Vec<u8>> {
    let out = match method {
        Compression::None => data.to_vec(),
        Compression::Zlib => {
            let mut decoder = flate2::read::ZlibDecoder::new(data);
            let mut out = Vec::with_capacity(decompressed_size);
            decoder
                .read_to_end(&mut out)
                .map_err(|e| Error::ZlibDecompressionFailed {
                    message: e.to_string(),
                })?;
            out
        }
        Compression::Lz4 => lz4_flex::decompress(data, decompressed_size).map_err(|e| {
            Error::Lz4DecompressionFailed {
                message: e.to_string(),
            }
        })?,
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &[u8] = b"the quick brown fox jumps over the lazy dog, repeatedly, \
                             the quick brown fox jumps over the lazy dog";

    #[test]
    fn zlib_round_trip() {
        let packed = compress(PAYLOAD, Compression::Zlib).unwrap();
        let unpacked = decompress(&packed, Compression::Zlib, PAYLOAD.len()).unwrap();
        assert_eq!(unpacked, PAYLOAD);
    }

    #[test]
    fn lz4_round_trip() {
        let packed = compress(PAYLOAD, Compression::Lz4).unwrap();
        let unpacked = decompress(&packed, Compression::Lz4, PAYLOAD.len()).unwrap();
        assert_eq!(unpacked, PAYLOAD);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let err = Compression::from_tag(9, ChunkId::new(b"SKEL")).unwrap_err();
        match err {
            crate::Error::UnsupportedCompression { method, chunk } => {
                assert_eq!(method, 9);
                assert_eq!(chunk, ChunkId::new(b"SKEL"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tags_are_stable() {
        assert_eq!(Compression::None.tag(), 0);
        assert_eq!(Compression::Zlib.tag(), 1);
        assert_eq!(Compression::Lz4.tag(), 2);
    }
}
