//! Binary stream writer and reader.
//!
//! ## Wire format
//!
//! | value        | encoding                                   |
//! |--------------|--------------------------------------------|
//! | `bool`       | one byte, `0` or `1`                       |
//! | `i32`/`u32`  | 4 bytes, little-endian                     |
//! | `u64`        | 8 bytes, little-endian                     |
//! | `f32`        | 4 bytes, IEEE-754 bits, little-endian      |
//! | `str`        | `u32` byte length + UTF-8 bytes            |
//! | byte block   | `u32` byte length + raw bytes              |
//! | nested block | `u32` byte length + nested field stream    |
//! | enum         | `u32` discriminant (see [`StreamEnum`])    |
//!
//! Nothing in the stream describes its own layout. Nested blocks are the one
//! exception: their length prefix lets a reader skip a payload it cannot
//! interpret without losing its position.

use glam::{Quat, Vec3, Vec4};

use crate::error::StreamError;

/// An enum persisted as its `u32` discriminant.
///
/// Decoding goes through [`StreamEnum::from_raw`], so a value outside the
/// legal set surfaces as [`StreamError::InvalidDiscriminant`] instead of
/// being accepted silently.
pub trait StreamEnum: Sized + Copy {
    /// Human-readable enum name used in error messages.
    const NAME: &'static str;

    /// The discriminant written to the stream.
    fn to_raw(self) -> u32;

    /// Map a discriminant back to a variant, or `None` if it is not legal.
    fn from_raw(raw: u32) -> Option<Self>;
}

/// Appends fields to an in-memory byte buffer.
#[derive(Debug, Clone, Default)]
pub struct StreamWriter {
    buf: Vec<u8>,
}

impl StreamWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return its buffer.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_vec3(&mut self, value: Vec3) {
        for c in value.to_array() {
            self.write_f32(c);
        }
    }

    pub fn write_vec4(&mut self, value: Vec4) {
        for c in value.to_array() {
            self.write_f32(c);
        }
    }

    /// Write a quaternion as `x, y, z, w`.
    pub fn write_quat(&mut self, value: Quat) {
        for c in value.to_array() {
            self.write_f32(c);
        }
    }

    /// Write an enum discriminant.
    pub fn write_enum<T: StreamEnum>(&mut self, value: T) {
        self.write_u32(value.to_raw());
    }

    /// Write a `u32` length prefix.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::LengthOverflow`] if `len` exceeds `u32::MAX`.
    pub fn write_len(&mut self, len: usize) -> Result<(), StreamError> {
        let len = u32::try_from(len).map_err(|_| StreamError::LengthOverflow(len))?;
        self.write_u32(len);
        Ok(())
    }

    /// Write a signed `i32` element count, the width used for object
    /// component counts.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::LengthOverflow`] if `count` exceeds `i32::MAX`.
    pub fn write_count(&mut self, count: usize) -> Result<(), StreamError> {
        let count = i32::try_from(count).map_err(|_| StreamError::LengthOverflow(count))?;
        self.write_i32(count);
        Ok(())
    }

    /// Write a length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> Result<(), StreamError> {
        self.write_bytes(value.as_bytes())
    }

    /// Write a length-prefixed raw byte block.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), StreamError> {
        self.write_len(bytes.len())?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Write a `u32` count followed by each item.
    pub fn write_seq<T, E>(
        &mut self,
        items: &[T],
        mut write_item: impl FnMut(&mut Self, &T) -> Result<(), E>,
    ) -> Result<(), E>
    where
        E: From<StreamError>,
    {
        self.write_len(items.len())?;
        for item in items {
            write_item(self, item)?;
        }
        Ok(())
    }

    /// Write a nested block: a `u32` byte length followed by whatever
    /// `write_body` emits.
    ///
    /// The prefix is reserved up front and patched once the body is known.
    pub fn write_block<E>(
        &mut self,
        write_body: impl FnOnce(&mut Self) -> Result<(), E>,
    ) -> Result<(), E>
    where
        E: From<StreamError>,
    {
        let prefix_at = self.buf.len();
        self.write_u32(0);
        write_body(self)?;

        let body_len = self.buf.len() - prefix_at - 4;
        let body_len =
            u32::try_from(body_len).map_err(|_| StreamError::LengthOverflow(body_len))?;
        self.buf[prefix_at..prefix_at + 4].copy_from_slice(&body_len.to_le_bytes());
        Ok(())
    }
}

/// Bounds-checked cursor over a byte slice written by [`StreamWriter`].
#[derive(Debug, Clone)]
pub struct StreamReader<'a> {
    data: &'a [u8],
    pos: usize,
    /// Absolute offset of `data[0]`, so errors inside nested blocks report
    /// positions relative to the outermost stream.
    base: usize,
}

impl<'a> StreamReader<'a> {
    /// Create a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            base: 0,
        }
    }

    /// Absolute offset of the next byte to be read.
    #[must_use]
    pub fn position(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes left to read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` once every byte has been consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Take the next `len` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::UnexpectedEof`] if fewer than `len` bytes remain.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], StreamError> {
        if len > self.remaining() {
            return Err(StreamError::UnexpectedEof {
                offset: self.position(),
                needed: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    pub fn read_bool(&mut self) -> Result<bool, StreamError> {
        let offset = self.position();
        match self.take_array::<1>()?[0] {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(StreamError::InvalidBool { offset, value }),
        }
    }

    pub fn read_i32(&mut self) -> Result<i32, StreamError> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u32(&mut self) -> Result<u32, StreamError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    pub fn read_u64(&mut self) -> Result<u64, StreamError> {
        Ok(u64::from_le_bytes(self.take_array()?))
    }

    pub fn read_f32(&mut self) -> Result<f32, StreamError> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    pub fn read_vec3(&mut self) -> Result<Vec3, StreamError> {
        Ok(Vec3::new(self.read_f32()?, self.read_f32()?, self.read_f32()?))
    }

    pub fn read_vec4(&mut self) -> Result<Vec4, StreamError> {
        Ok(Vec4::new(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read a quaternion written as `x, y, z, w`.
    pub fn read_quat(&mut self) -> Result<Quat, StreamError> {
        Ok(Quat::from_xyzw(
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
            self.read_f32()?,
        ))
    }

    /// Read and validate an enum discriminant.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDiscriminant`] if the value is not a
    /// legal variant of `T`.
    pub fn read_enum<T: StreamEnum>(&mut self) -> Result<T, StreamError> {
        let value = self.read_u32()?;
        T::from_raw(value).ok_or(StreamError::InvalidDiscriminant {
            kind: T::NAME,
            value,
        })
    }

    /// Read a `u32` length prefix.
    pub fn read_len(&mut self) -> Result<usize, StreamError> {
        Ok(self.read_u32()? as usize)
    }

    /// Read a signed `i32` element count.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::NegativeLength`] for values below zero.
    pub fn read_count(&mut self) -> Result<usize, StreamError> {
        let count = self.read_i32()?;
        usize::try_from(count).map_err(|_| StreamError::NegativeLength(count))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String, StreamError> {
        let offset = self.position();
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|source| StreamError::InvalidUtf8 { offset, source })
    }

    /// Read a length-prefixed raw byte block.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>, StreamError> {
        let len = self.read_len()?;
        Ok(self.take(len)?.to_vec())
    }

    /// Read a `u32` count followed by that many items.
    pub fn read_seq<T, E>(
        &mut self,
        mut read_item: impl FnMut(&mut Self) -> Result<T, E>,
    ) -> Result<Vec<T>, E>
    where
        E: From<StreamError>,
    {
        let count = self.read_len()?;
        // A corrupt count must not trigger a huge allocation up front.
        let mut items = Vec::with_capacity(count.min(self.remaining()));
        for _ in 0..count {
            items.push(read_item(self)?);
        }
        Ok(items)
    }

    /// Read a nested block and return a reader bounded to its body.
    ///
    /// The outer reader is advanced past the whole block whether or not the
    /// returned reader is used, which is what makes skipping safe.
    pub fn read_block(&mut self) -> Result<StreamReader<'a>, StreamError> {
        let len = self.read_len()?;
        let base = self.position();
        let body = self.take(len)?;
        Ok(StreamReader {
            data: body,
            pos: 0,
            base,
        })
    }

    /// Assert that every byte has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::TrailingBytes`] if unread bytes remain.
    pub fn finish(&self) -> Result<(), StreamError> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(StreamError::TrailingBytes { remaining }),
        }
    }
}
