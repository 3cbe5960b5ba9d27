//! # engine_io
//!
//! The serialization protocol shared by every persisted engine type.
//!
//! Data is written as an ordered, untagged sequence of little-endian
//! primitives. Writer and reader must agree on field order and width; the
//! reader checks every read against the bytes actually present and fails
//! with a [`StreamError`] instead of producing defaulted fields.
//!
//! This crate provides:
//!
//! - [`StreamWriter`]: appends primitives, strings, byte blocks and
//!   length-prefixed nested blocks to an in-memory buffer.
//! - [`StreamReader`]: the symmetric, bounds-checked cursor.
//! - [`StreamEnum`]: integer discriminant encoding with validation.
//! - [`file`]: whole-file load/store helpers.
//! - [`error`]: stream error types.

pub mod error;
pub mod file;
pub mod stream;

pub use error::StreamError;
pub use stream::{StreamEnum, StreamReader, StreamWriter};
