//! Small shared helpers

use std::path::Path;

use crate::error::{Error, Result};

/// Write a fully materialized buffer to `path` atomically.
///
/// The bytes go to a temporary file in the destination directory first and
/// are published with a rename only once everything is on disk. A failure
/// at any point leaves the destination untouched; no partial output file
/// is ever visible.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());

    let map_err = |e: std::io::Error| Error::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir),
        None => tempfile::NamedTempFile::new_in("."),
    }
    .map_err(map_err)?;

    use std::io::Write;
    tmp.write_all(bytes).map_err(map_err)?;
    tmp.flush().map_err(map_err)?;

    tmp.persist(path).map_err(|e| Error::OutputWrite {
        path: path.to_path_buf(),
        message: e.error.to_string(),
    })?;

    tracing::debug!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publishes_full_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.mdb");
        write_atomic(&path, b"payload").unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn missing_directory_fails_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope").join("out.mdb");
        assert!(matches!(
            write_atomic(&path, b"payload"),
            Err(Error::OutputWrite { .. })
        ));
        assert!(!path.exists());
    }
}
