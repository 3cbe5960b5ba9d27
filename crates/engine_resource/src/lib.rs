//! # engine_resource
//!
//! Resources loaded from disk and cached in the engine's own binary format.
//!
//! A [`Texture`] can be imported from a common image file through an
//! [`ImageImporter`], then saved as an engine `.texture` file and reloaded
//! from it without decoding the image again.

pub mod error;
pub mod importer;
pub mod texture;

pub use error::TextureError;
pub use importer::{ImageImporter, RgbaImporter};
pub use texture::{LoadState, PixelFormat, TEXTURE_EXTENSION, Texture};
