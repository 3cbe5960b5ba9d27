//! Texture resource and its engine file format.
//!
//! ```text
//! [mipCount:u32] mipCount × [mip:block]
//! [bpp:u32][width:u32][height:u32][channels:u32]
//! [isGrayscale:bool][isTransparent:bool][usingMipmaps:bool]
//! [resourceId:str][resourceName:str][resourceFilePath:str][format:u32]
//! ```
//!
//! Once a texture has been loaded from its engine file the pixel bytes are
//! dropped; saving it again reads them back from that file first.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use engine_io::{StreamEnum, StreamError, StreamReader, StreamWriter, file};
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::error::TextureError;
use crate::importer::ImageImporter;

/// Extension of engine texture files.
pub const TEXTURE_EXTENSION: &str = "texture";

/// Layout of one texel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelFormat {
    R8Unorm,
    Rg8Unorm,
    #[default]
    Rgba8Unorm,
    Rgba32Float,
}

impl PixelFormat {
    #[must_use]
    pub fn channels(self) -> u32 {
        match self {
            PixelFormat::R8Unorm => 1,
            PixelFormat::Rg8Unorm => 2,
            PixelFormat::Rgba8Unorm | PixelFormat::Rgba32Float => 4,
        }
    }

    #[must_use]
    pub fn bits_per_pixel(self) -> u32 {
        match self {
            PixelFormat::R8Unorm => 8,
            PixelFormat::Rg8Unorm => 16,
            PixelFormat::Rgba8Unorm => 32,
            PixelFormat::Rgba32Float => 128,
        }
    }
}

impl StreamEnum for PixelFormat {
    const NAME: &'static str = "PixelFormat";

    fn to_raw(self) -> u32 {
        match self {
            PixelFormat::R8Unorm => 0,
            PixelFormat::Rg8Unorm => 1,
            PixelFormat::Rgba8Unorm => 2,
            PixelFormat::Rgba32Float => 3,
        }
    }

    fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(PixelFormat::R8Unorm),
            1 => Some(PixelFormat::Rg8Unorm),
            2 => Some(PixelFormat::Rgba8Unorm),
            3 => Some(PixelFormat::Rgba32Float),
            _ => None,
        }
    }
}

/// Progress of the last [`Texture::load_from_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Started,
    Completed,
    Failed,
}

/// A 2D texture with an optional mip chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    resource_id: String,
    resource_name: String,
    resource_path: String,
    mips: Vec<Vec<u8>>,
    bpp: u32,
    width: u32,
    height: u32,
    channels: u32,
    grayscale: bool,
    transparent: bool,
    using_mipmaps: bool,
    format: PixelFormat,
    load_state: LoadState,
}

impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

impl Texture {
    /// An empty RGBA8 texture with a fresh resource id.
    #[must_use]
    pub fn new() -> Self {
        Self {
            resource_id: Uuid::new_v4().to_string(),
            resource_name: String::new(),
            resource_path: String::new(),
            mips: Vec::new(),
            bpp: 0,
            width: 0,
            height: 0,
            channels: 0,
            grayscale: false,
            transparent: false,
            using_mipmaps: true,
            format: PixelFormat::Rgba8Unorm,
            load_state: LoadState::Idle,
        }
    }

    #[must_use]
    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    #[must_use]
    pub fn resource_name(&self) -> &str {
        &self.resource_name
    }

    pub fn set_resource_name(&mut self, name: impl Into<String>) {
        self.resource_name = name.into();
    }

    /// The engine file this texture is cached in.
    #[must_use]
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    pub fn set_resource_path(&mut self, path: impl AsRef<Path>) {
        self.resource_path = path.as_ref().to_string_lossy().into_owned();
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    #[must_use]
    pub fn bpp(&self) -> u32 {
        self.bpp
    }

    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        self.grayscale
    }

    pub fn set_grayscale(&mut self, grayscale: bool) {
        self.grayscale = grayscale;
    }

    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn set_transparent(&mut self, transparent: bool) {
        self.transparent = transparent;
    }

    /// Whether the stored bytes already include a full mip chain.
    #[must_use]
    pub fn is_using_mipmaps(&self) -> bool {
        self.using_mipmaps
    }

    #[must_use]
    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    #[must_use]
    pub fn mip_count(&self) -> usize {
        self.mips.len()
    }

    /// Replace the pixel data with a single level.
    pub fn set_pixels(&mut self, width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) {
        self.width = width;
        self.height = height;
        self.format = format;
        self.channels = format.channels();
        self.bpp = format.bits_per_pixel();
        self.mips = vec![pixels];
        self.using_mipmaps = false;
    }

    /// Append the next smaller level.
    pub fn push_mip(&mut self, pixels: Vec<u8>) {
        self.mips.push(pixels);
        self.using_mipmaps = self.mips.len() > 1;
    }

    /// The bytes of mip level `index`.
    #[must_use]
    pub fn mip(&self, index: usize) -> Option<&[u8]> {
        let mip = self.mips.get(index).map(Vec::as_slice);
        if mip.is_none() {
            warn!(texture = %self.resource_name, index, mips = self.mips.len(), "mip index out of range");
        }
        mip
    }

    /// Bytes held by the mip chain.
    #[must_use]
    pub fn memory_usage(&self) -> usize {
        self.mips.iter().map(Vec::len).sum()
    }

    /// Drop the pixel bytes, keeping every other property.
    pub fn clear_bytes(&mut self) {
        self.mips = Vec::new();
    }

    /// Write the engine texture stream.
    pub fn save(&self, w: &mut StreamWriter) -> Result<(), StreamError> {
        w.write_len(self.mips.len())?;
        for mip in &self.mips {
            w.write_bytes(mip)?;
        }
        w.write_u32(self.bpp);
        w.write_u32(self.width);
        w.write_u32(self.height);
        w.write_u32(self.channels);
        w.write_bool(self.grayscale);
        w.write_bool(self.transparent);
        w.write_bool(self.using_mipmaps);
        w.write_str(&self.resource_id)?;
        w.write_str(&self.resource_name)?;
        w.write_str(&self.resource_path)?;
        w.write_enum(self.format);
        Ok(())
    }

    /// Read the engine texture stream, replacing every persisted property.
    pub fn load(&mut self, r: &mut StreamReader<'_>) -> Result<(), StreamError> {
        self.mips = r.read_seq(StreamReader::read_bytes)?;
        self.bpp = r.read_u32()?;
        self.width = r.read_u32()?;
        self.height = r.read_u32()?;
        self.channels = r.read_u32()?;
        self.grayscale = r.read_bool()?;
        self.transparent = r.read_bool()?;
        self.using_mipmaps = r.read_bool()?;
        self.resource_id = r.read_string()?;
        self.resource_name = r.read_string()?;
        self.resource_path = r.read_string()?;
        self.format = r.read_enum()?;
        Ok(())
    }

    /// Save as an engine texture file at `path`, then drop the pixel bytes.
    ///
    /// If the bytes were already dropped they are first read back from the
    /// texture's own engine file, so saving never replaces pixels with
    /// nothing.
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), TextureError> {
        let path = path.as_ref();
        if self.mips.is_empty() {
            self.reload_bytes()?;
        }

        let mut w = StreamWriter::new();
        self.save(&mut w)?;
        file::store(path, &w)?;
        debug!(texture = %self.resource_name, path = %path.display(), "texture saved");

        self.clear_bytes();
        Ok(())
    }

    /// Load from an engine texture file or from any image `importer`
    /// supports.
    ///
    /// Engine files drop their pixel bytes once read. Imported images keep
    /// them, since they have not been saved yet, and get a resource path
    /// pointing at the `.texture` file they will be saved to.
    pub fn load_from_file(
        &mut self,
        path: impl AsRef<Path>,
        importer: &dyn ImageImporter,
    ) -> Result<(), TextureError> {
        let path = path.as_ref();
        self.clear_bytes();
        self.load_state = LoadState::Started;

        match self.load_any(path, importer) {
            Ok(()) => {
                self.load_state = LoadState::Completed;
                debug!(texture = %self.resource_name, path = %path.display(), "texture loaded");
                Ok(())
            }
            Err(err) => {
                error!(path = %path.display(), error = %err, "failed to load texture");
                self.load_state = LoadState::Failed;
                Err(err)
            }
        }
    }

    fn load_any(&mut self, path: &Path, importer: &dyn ImageImporter) -> Result<(), TextureError> {
        if is_engine_texture(path) {
            let bytes = file::load(path)?;
            let mut r = StreamReader::new(&bytes);
            self.load(&mut r)?;
            r.finish()?;
            self.clear_bytes();
            return Ok(());
        }

        if !importer.supports(path) {
            return Err(TextureError::UnsupportedFormat(path.to_path_buf()));
        }
        importer.import(path, self)?;

        let engine_path = path.with_extension(TEXTURE_EXTENSION);
        self.resource_name = engine_path
            .file_stem()
            .and_then(OsStr::to_str)
            .unwrap_or_default()
            .to_string();
        self.set_resource_path(engine_path);
        Ok(())
    }

    /// Read the mip chain back from the texture's engine file.
    fn reload_bytes(&mut self) -> Result<(), TextureError> {
        if self.resource_path.is_empty() {
            return Err(TextureError::Unassigned);
        }
        let source = PathBuf::from(&self.resource_path);
        if !is_engine_texture(&source) || !source.exists() {
            warn!(texture = %self.resource_name, path = %source.display(), "no cached bytes to reload");
            return Ok(());
        }

        let bytes = file::load(&source)?;
        self.mips = StreamReader::new(&bytes).read_seq(StreamReader::read_bytes)?;
        Ok(())
    }
}

fn is_engine_texture(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEXTURE_EXTENSION))
}
