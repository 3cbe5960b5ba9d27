//! Whole-file load and store helpers.
//!
//! Streams are built in memory and written in one go; loading reads the
//! entire file before any field is decoded.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::StreamError;
use crate::stream::StreamWriter;

/// Write the contents of `writer` to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns [`StreamError::Io`] if the file cannot be written.
pub fn store(path: impl AsRef<Path>, writer: &StreamWriter) -> Result<(), StreamError> {
    let path = path.as_ref();
    fs::write(path, writer.as_bytes())?;
    debug!(path = %path.display(), bytes = writer.len(), "stream stored");
    Ok(())
}

/// Read the whole file at `path`.
///
/// # Errors
///
/// Returns [`StreamError::Io`] if the file cannot be read.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<u8>, StreamError> {
    let path = path.as_ref();
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "stream loaded");
    Ok(bytes)
}
