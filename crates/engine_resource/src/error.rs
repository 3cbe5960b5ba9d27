//! Resource error types.

use std::path::PathBuf;

use engine_io::StreamError;

/// Errors raised while loading or saving a texture.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    /// Reading or writing the engine texture stream failed.
    #[error("texture stream error: {0}")]
    Stream(#[from] StreamError),

    /// The file extension is neither the engine's nor a supported image.
    #[error("unsupported texture file {0}")]
    UnsupportedFormat(PathBuf),

    /// A foreign image could not be decoded.
    #[error("failed to decode image {path}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The texture has no resource path to read from or write to.
    #[error("texture has no resource path")]
    Unassigned,
}
