//! Little-endian byte assembly for unit tests.

use std::io::Cursor;

use crate::cursor::ByteCursor;

#[derive(Default)]
pub(crate) struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn i32(mut self, v: i32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn i32s(self, vs: &[i32]) -> Self {
        vs.iter().fold(self, |b, &v| b.i32(v))
    }

    pub fn i64(mut self, v: i64) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f32(mut self, v: f32) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn f64(mut self, v: f64) -> Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn str(self, s: &str) -> Self {
        s.chars().fold(self, |b, c| b.i32(c as i32)).i32(0)
    }

    /// A complete FE quadrilateral / block / no raw-local zone record.
    pub fn zone_record(self, name: &str, nelements: i32, nnodes: i32) -> Self {
        self.f32(299.0)
            .str(name)
            .i32(-1) // parent zone
            .i32(-1) // strand
            .f64(0.0) // solution time
            .i32(-1) // unused
            .i32(3) // FEQUADRILATERAL
            .i32(0) // block
            .i32(0) // var location
            .i32(0) // raw local
            .i32(nnodes)
            .i32(nelements)
            .i32s(&[0, 0, 0])
            .i32(0) // separator
    }

    pub fn len(&self) -> u64 {
        self.0.len() as u64
    }

    pub fn cursor(self) -> ByteCursor<Cursor<Vec<u8>>> {
        ByteCursor::new(Cursor::new(self.0))
    }
}
