//! Foreign image import.

use std::path::Path;

use image::GenericImageView;

use crate::error::TextureError;
use crate::texture::{PixelFormat, Texture};

/// Decodes common image files into a [`Texture`].
pub trait ImageImporter {
    /// Lower-case file extensions this importer can decode.
    fn extensions(&self) -> &[&str];

    /// Fill `texture` with the pixels and properties of the image at `path`.
    fn import(&self, path: &Path, texture: &mut Texture) -> Result<(), TextureError>;

    /// Returns `true` if `path` has one of [`ImageImporter::extensions`].
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|known| known.eq_ignore_ascii_case(ext))
            })
    }
}

/// Decodes PNG and JPEG files with the `image` crate into a single RGBA8 mip.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbaImporter;

impl ImageImporter for RgbaImporter {
    fn extensions(&self) -> &[&str] {
        &["png", "jpg", "jpeg"]
    }

    fn import(&self, path: &Path, texture: &mut Texture) -> Result<(), TextureError> {
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let color = image.color();
        let (width, height) = image.dimensions();
        texture.set_pixels(width, height, PixelFormat::Rgba8Unorm, image.into_rgba8().into_raw());
        texture.set_grayscale(!color.has_color());
        texture.set_transparent(color.has_alpha());
        Ok(())
    }
}
