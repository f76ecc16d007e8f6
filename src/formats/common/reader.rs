//! Bounds-checked little-endian cursor over a byte buffer

use glam::{Quat, Vec3};

use crate::error::{Error, Result};

/// Sequential reader with an explicit position.
///
/// Every read is bounds-checked against the buffer; a read past the end
/// fails with [`Error::TruncatedInput`] instead of panicking, carrying the
/// offset the read was attempted at.
pub struct BinaryReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current cursor position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Move the cursor to an absolute offset.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(Error::TruncatedInput {
                offset: pos,
                needed: 0,
                available: 0,
            });
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n)?;
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(Error::TruncatedInput {
                offset: self.pos,
                needed: n,
                available,
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let b = self.take(4)?;
        Ok(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Read a 4-byte array, typically a fourcc tag.
    pub fn read_fourcc(&mut self) -> Result<[u8; 4]> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    /// Read a fixed-size NUL-padded string field.
    ///
    /// The field occupies exactly `n` bytes; the string ends at the first
    /// NUL byte. Invalid UTF-8 is replaced rather than rejected, matching
    /// what the original files contain (plain ASCII names in practice).
    pub fn read_fixed_string(&mut self, n: usize) -> Result<String> {
        let bytes = self.take(n)?;
        let len = bytes.iter().position(|&b| b == 0).unwrap_or(n);
        Ok(String::from_utf8_lossy(&bytes[..len]).into_owned())
    }

    pub fn read_vec3(&mut self) -> Result<Vec3> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        Ok(Vec3::new(x, y, z))
    }

    /// Read a quaternion stored as x, y, z, w.
    pub fn read_quat(&mut self) -> Result<Quat> {
        let x = self.read_f32()?;
        let y = self.read_f32()?;
        let z = self.read_f32()?;
        let w = self.read_f32()?;
        Ok(Quat::from_xyzw(x, y, z, w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scalars_in_order() {
        let data = [0x01, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut r = BinaryReader::new(&data);
        assert_eq!(r.read_u8().unwrap(), 1);
        assert_eq!(r.read_u16().unwrap(), 2);
        assert_eq!(r.read_u32().unwrap(), 3);
        assert!(r.is_empty());
    }

    #[test]
    fn truncated_read_reports_offset() {
        let data = [0u8; 3];
        let mut r = BinaryReader::new(&data);
        r.read_u8().unwrap();
        let err = r.read_u32().unwrap_err();
        match err {
            Error::TruncatedInput {
                offset,
                needed,
                available,
            } => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn fixed_string_stops_at_nul() {
        let mut field = [0u8; 32];
        field[..4].copy_from_slice(b"door");
        let mut r = BinaryReader::new(&field);
        assert_eq!(r.read_fixed_string(32).unwrap(), "door");
        assert!(r.is_empty());
    }

    #[test]
    fn fixed_string_without_nul_uses_full_field() {
        let mut r = BinaryReader::new(b"abcd");
        assert_eq!(r.read_fixed_string(4).unwrap(), "abcd");
    }

    #[test]
    fn seek_past_end_fails() {
        let mut r = BinaryReader::new(&[0u8; 4]);
        assert!(r.seek(4).is_ok());
        assert!(r.seek(5).is_err());
    }
}
