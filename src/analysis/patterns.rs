//! Source image loading into raw RGBA buffers

use crate::analysis::extraction::{ExtractionObserver, ExtractionSettings, TileExtractor};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::tiles::TileSet;
use std::path::Path;

/// A decoded source image as a flat RGBA buffer
pub struct ImageProcessor {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
}

impl ImageProcessor {
    /// Load and decode an image file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file at the given path cannot be opened or read
    /// - The file is not a valid image format
    pub fn from_png_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_buf = path.as_ref().to_path_buf();
        let img = image::open(&path_buf).map_err(|e| AlgorithmError::ImageLoad {
            path: path_buf,
            source: e,
        })?;
        let rgba_img = img.to_rgba8();
        let (width, height) = (rgba_img.width() as usize, rgba_img.height() as usize);

        Ok(Self {
            buffer: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Wrap an existing RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns `InvalidImageData` if the buffer is not `width * height * 4` bytes
    pub fn from_raw_image(buffer: Vec<u8>, width: usize, height: usize) -> Result<Self> {
        let expected = width.saturating_mul(height).saturating_mul(4);
        if buffer.len() != expected {
            return Err(AlgorithmError::InvalidImageData {
                width,
                height,
                expected,
                actual: buffer.len(),
            });
        }

        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    /// Raw RGBA bytes, row-major
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Image width in pixels
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Extract the tile set of this image
    ///
    /// # Errors
    ///
    /// Returns an error if the settings do not fit the image
    pub fn extract_tiles(
        &self,
        settings: ExtractionSettings,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<TileSet> {
        TileExtractor::extract_tiles_observed(
            &self.buffer,
            self.width,
            self.height,
            settings,
            observer,
        )
    }
}
