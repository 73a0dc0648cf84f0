#![doc = r#"
Byte cursor over a borrowed project buffer.

All integers in the format are little-endian. The [`Reader`] never copies:
slices it hands out borrow the original buffer, so raw [`Event`]s can be
walked without allocating.
"#]

mod error;
pub use error::*;

use crate::{event::Event, varint};

/// A forward-only cursor over a byte slice.
///
/// A reader created for a nested payload keeps the absolute offset of its
/// first byte, so error positions always refer to the whole file.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    position: usize,
    base: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over a full buffer
    pub const fn from_byte_slice(data: &'a [u8]) -> Self {
        Self {
            data,
            position: 0,
            base: 0,
        }
    }

    /// Create a reader over a payload that starts at `base` in the file
    pub const fn with_base(data: &'a [u8], base: usize) -> Self {
        Self {
            data,
            position: 0,
            base,
        }
    }

    /// Absolute position of the cursor
    pub const fn buffer_position(&self) -> usize {
        self.base + self.position
    }

    /// Bytes left to read
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// True once every byte has been consumed
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Length of the underlying slice
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Read a fixed number of bytes
    pub fn read_exact_size<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let slice = self.read_slice(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }

    /// Borrow the next `len` bytes
    pub fn read_slice(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::truncated(self.base + self.data.len()));
        }
        let start = self.position;
        self.position += len;
        Ok(&self.data[start..self.position])
    }

    /// Borrow everything that is left
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.position..];
        self.position = self.data.len();
        rest
    }

    /// Skip `len` bytes
    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.read_slice(len).map(|_| ())
    }

    /// Read a byte
    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        self.read_exact_size::<1>().map(|[b]| b)
    }

    /// Read a byte as a boolean (non-zero is true)
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Read a `u16`
    pub fn read_u16(&mut self) -> DecodeResult<u16> {
        self.read_exact_size().map(u16::from_le_bytes)
    }

    /// Read an `i16`
    pub fn read_i16(&mut self) -> DecodeResult<i16> {
        self.read_exact_size().map(i16::from_le_bytes)
    }

    /// Read a `u32`
    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_exact_size().map(u32::from_le_bytes)
    }

    /// Read an `i32`
    pub fn read_i32(&mut self) -> DecodeResult<i32> {
        self.read_exact_size().map(i32::from_le_bytes)
    }

    /// Read a `u64`
    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.read_exact_size().map(u64::from_le_bytes)
    }

    /// Read an `i64`
    pub fn read_i64(&mut self) -> DecodeResult<i64> {
        self.read_exact_size().map(i64::from_le_bytes)
    }

    /// Read an `f32`
    pub fn read_f32(&mut self) -> DecodeResult<f32> {
        self.read_exact_size().map(f32::from_le_bytes)
    }

    /// Read an `f64`
    pub fn read_f64(&mut self) -> DecodeResult<f64> {
        self.read_exact_size().map(f64::from_le_bytes)
    }

    /// Read a varint
    pub fn read_varint(&mut self) -> DecodeResult<u64> {
        varint::decode(self)
    }

    /// Read a varint length prefix and borrow that many bytes.
    ///
    /// A length larger than what is left is [`RangeError::Length`], not a
    /// truncation: the prefix itself is what is wrong.
    pub fn read_length_prefixed(&mut self) -> DecodeResult<&'a [u8]> {
        let prefix_at = self.buffer_position();
        let length = self.read_varint()?;
        let remaining = self.remaining();
        match usize::try_from(length) {
            Ok(len) if len <= remaining => self.read_slice(len),
            _ => Err(DecodeError::range(
                prefix_at,
                RangeError::Length { length, remaining },
            )),
        }
    }

    /// Read the next raw event, or `None` at the end of the buffer
    pub fn read_event(&mut self) -> DecodeResult<Option<Event<'a>>> {
        if self.is_empty() {
            return Ok(None);
        }
        Event::read(self).map(Some)
    }
}
