//! Positioned little-endian reader over a seekable byte stream.

use std::io::{self, Read, Seek, SeekFrom};

use crate::error::{Result, TecplotError};

/// Initial capacity cap for bulk reads; larger blocks grow as bytes arrive.
const BLOCK_PREALLOC_LIMIT: u64 = 1 << 20;

/// Byte cursor that tracks the file offset of every read.
///
/// `offset()` always equals the number of bytes consumed from the start of
/// the stream. [`ByteCursor::check_position`] compares it with the
/// underlying stream position.
pub struct ByteCursor<R> {
    inner: R,
    n: u64,
}

impl<R: Read + Seek> ByteCursor<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, n: 0 }
    }

    /// Current tracked offset.
    pub fn offset(&self) -> u64 {
        self.n
    }

    //  Raw reads

    /// Fill `buf` completely or fail with `UnexpectedEof`.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(TecplotError::UnexpectedEof {
                        offset: self.n + filled as u64,
                        needed: (buf.len() - filled) as u64,
                    });
                }
                Ok(k) => filled += k,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.n += buf.len() as u64;
        Ok(())
    }

    /// Read exactly `len` bytes into a fresh buffer.
    pub fn read_exact(&mut self, len: u64) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(len.min(BLOCK_PREALLOC_LIMIT) as usize);
        let got = (&mut self.inner).take(len).read_to_end(&mut buf)? as u64;
        if got < len {
            return Err(TecplotError::UnexpectedEof {
                offset: self.n + got,
                needed: len - got,
            });
        }
        self.n += len;
        Ok(buf)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read_into(&mut buf)?;
        Ok(buf)
    }

    //  Fixed-width values

    pub fn read_i32(&mut self) -> Result<i32> {
        Ok(i32::from_le_bytes(self.read_array()?))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        Ok(i64::from_le_bytes(self.read_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        Ok(f32::from_le_bytes(self.read_array()?))
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        Ok(f64::from_le_bytes(self.read_array()?))
    }

    /// Read `count` consecutive `i32` values.
    pub fn read_i32s(&mut self, count: usize) -> Result<Vec<i32>> {
        let bytes = self.read_exact(checked_len(self.n, count, 4)?)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }

    /// Read `count` consecutive `f64` values.
    pub fn read_f64s(&mut self, count: usize) -> Result<Vec<f64>> {
        let bytes = self.read_exact(checked_len(self.n, count, 8)?)?;
        Ok(bytes
            .chunks_exact(8)
            .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
            .collect())
    }

    /// A 0/1 integer flag. Anything else is malformed.
    pub fn read_flag(&mut self, field: &'static str) -> Result<bool> {
        let offset = self.n;
        match self.read_i32()? {
            0 => Ok(false),
            1 => Ok(true),
            v => Err(TecplotError::MalformedField {
                offset,
                field,
                reason: format!("expected 0 or 1, got {v}"),
            }),
        }
    }

    /// A non-negative `i32` count.
    pub fn read_count(&mut self, field: &'static str) -> Result<u32> {
        let offset = self.n;
        let v = self.read_i32()?;
        u32::try_from(v).map_err(|_| TecplotError::MalformedField {
            offset,
            field,
            reason: format!("negative value {v}"),
        })
    }

    //  Positioning

    /// Step back over the last `len` bytes so they can be read again.
    pub fn rewind(&mut self, len: u64) -> Result<()> {
        let target = self.n.checked_sub(len).ok_or(TecplotError::CursorDesync {
            offset: self.n,
            actual: 0,
        })?;
        self.inner.seek(SeekFrom::Start(target))?;
        self.n = target;
        Ok(())
    }

    /// Fail with `CursorDesync` if the stream has drifted from the tracked offset.
    pub fn check_position(&mut self) -> Result<()> {
        let actual = self.inner.stream_position()?;
        if actual != self.n {
            return Err(TecplotError::CursorDesync {
                offset: self.n,
                actual,
            });
        }
        Ok(())
    }

    /// Count the bytes left in the stream, consuming them.
    pub fn drain_remaining(&mut self) -> Result<u64> {
        Ok(io::copy(&mut self.inner, &mut io::sink())?)
    }
}

/// `count * width` in bytes, or `MalformedField` if it overflows.
pub(crate) fn checked_len(offset: u64, count: usize, width: usize) -> Result<u64> {
    count
        .checked_mul(width)
        .map(|len| len as u64)
        .ok_or_else(|| TecplotError::MalformedField {
            offset,
            field: "block length",
            reason: format!("{count} values of {width} bytes overflows"),
        })
}
