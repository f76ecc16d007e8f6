//! Growable little-endian write sink

use glam::{Quat, Vec3};

/// Byte sink backed by a growable buffer.
///
/// Writing never fails and never overflows; the buffer grows on demand.
/// The encoded bytes are taken out with [`BinaryWriter::into_bytes`] once
/// the full payload has been materialized.
#[derive(Default)]
pub struct BinaryWriter {
    data: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn write_u8(&mut self, v: u8) {
        self.data.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u32(&mut self, v: u32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.data.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a string into a fixed-size NUL-padded field.
    ///
    /// Strings longer than the field are truncated at `n` bytes, matching
    /// the `strncpy` behavior of the original tools.
    pub fn write_fixed_string(&mut self, s: &str, n: usize) {
        let bytes = s.as_bytes();
        let copy_len = bytes.len().min(n);
        self.data.extend_from_slice(&bytes[..copy_len]);
        self.data.extend(std::iter::repeat_n(0u8, n - copy_len));
    }

    pub fn write_vec3(&mut self, v: Vec3) {
        self.write_f32(v.x);
        self.write_f32(v.y);
        self.write_f32(v.z);
    }

    /// Write a quaternion as x, y, z, w.
    pub fn write_quat(&mut self, q: Quat) {
        self.write_f32(q.x);
        self.write_f32(q.y);
        self.write_f32(q.z);
        self.write_f32(q.w);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_string_pads_and_truncates() {
        let mut w = BinaryWriter::new();
        w.write_fixed_string("ab", 4);
        assert_eq!(w.as_bytes(), b"ab\0\0");

        let mut w = BinaryWriter::new();
        w.write_fixed_string("abcdef", 4);
        assert_eq!(w.as_bytes(), b"abcd");
    }
}
