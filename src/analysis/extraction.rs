//! Tile extraction from raw RGBA pixel buffers
//!
//! Slides a `tile_size` window over the source, optionally adding flipped and
//! rotated variants of each window, keeps the first occurrence of every
//! distinct tile and finally computes adjacency over the complete set.

use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::pixel::Pixel;
use crate::spatial::tiles::{Tile, TileSet};
use std::collections::HashSet;

/// Parameters controlling how tiles are sampled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionSettings {
    /// Side length of the sampling window
    pub tile_size: usize,
    /// Start a window at every pixel, wrapping around the image edges
    pub loop_edges: bool,
    /// Add horizontally and vertically mirrored variants
    pub include_flipped: bool,
    /// Add 90, 180 and 270 degree rotations
    pub include_rotated: bool,
}

/// Receives informational progress while tiles are extracted
///
/// Callbacks never influence the result.
pub trait ExtractionObserver {
    /// Called before sampling starts with the number of rows to process
    fn extraction_started(&mut self, _rows: usize) {}

    /// Called after every sampled row
    fn row_processed(&mut self, _row: usize, _total_tiles: usize) {}

    /// Called after the neighbor sets of one tile have been computed
    fn tile_processed(&mut self, _tile_index: usize, _total_tiles: usize) {}
}

/// Observer that ignores all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl ExtractionObserver for SilentObserver {}

/// Extracts a deduplicated tile set from an image buffer
pub struct TileExtractor;

impl TileExtractor {
    /// Extract tiles and their adjacency from an RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `buffer` is not exactly `width * height * 4` bytes (`InvalidImageData`)
    /// - The tile size is zero, or larger than the image without edge looping
    pub fn extract_tiles(
        buffer: &[u8],
        width: usize,
        height: usize,
        settings: ExtractionSettings,
    ) -> Result<TileSet> {
        Self::extract_tiles_observed(buffer, width, height, settings, &mut SilentObserver)
    }

    /// Extract tiles, reporting progress to `observer`
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `buffer` is not exactly `width * height * 4` bytes (`InvalidImageData`)
    /// - The tile size is zero, or larger than the image without edge looping
    pub fn extract_tiles_observed(
        buffer: &[u8],
        width: usize,
        height: usize,
        settings: ExtractionSettings,
        observer: &mut dyn ExtractionObserver,
    ) -> Result<TileSet> {
        Self::validate(buffer, width, height, settings)?;

        let tile_size = settings.tile_size;
        let (x_limit, y_limit) = if settings.loop_edges {
            (width, height)
        } else {
            (width - tile_size + 1, height - tile_size + 1)
        };

        observer.extraction_started(y_limit);

        let mut seen: HashSet<Tile> = HashSet::new();
        let mut tiles = Vec::new();

        for y in 0..y_limit {
            for x in 0..x_limit {
                let tile = Self::sample(buffer, width, height, x, y, tile_size)?;
                for candidate in Self::variants(tile, settings) {
                    if !seen.contains(&candidate) {
                        seen.insert(candidate.clone());
                        tiles.push(candidate);
                    }
                }
            }
            observer.row_processed(y, tiles.len());
        }

        // Adjacency only once the membership is final
        let mut tile_set = TileSet::new_unlinked(tiles);
        let total = tile_set.len();
        for index in 0..total {
            tile_set.fill_neighbors_of(index);
            observer.tile_processed(index, total);
        }

        Ok(tile_set)
    }

    fn validate(
        buffer: &[u8],
        width: usize,
        height: usize,
        settings: ExtractionSettings,
    ) -> Result<()> {
        let expected = width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(4));
        if expected != Some(buffer.len()) || width == 0 || height == 0 {
            return Err(AlgorithmError::InvalidImageData {
                width,
                height,
                expected: expected.unwrap_or(usize::MAX),
                actual: buffer.len(),
            });
        }

        if settings.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &settings.tile_size,
                &"must be at least 1",
            ));
        }

        if !settings.loop_edges && (settings.tile_size > width || settings.tile_size > height) {
            return Err(invalid_parameter(
                "tile_size",
                &settings.tile_size,
                &format!("exceeds the {width}x{height} image without edge looping"),
            ));
        }

        Ok(())
    }

    // Window reads always wrap; looping only decides how many windows exist
    fn sample(
        buffer: &[u8],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        tile_size: usize,
    ) -> Result<Tile> {
        let mut pixels = Vec::with_capacity(tile_size * tile_size);
        for ty in 0..tile_size {
            for tx in 0..tile_size {
                let px = (x + tx) % width;
                let py = (y + ty) % height;
                let pixel = Pixel::from_rgba(buffer, py * width + px).ok_or(
                    AlgorithmError::InvalidImageData {
                        width,
                        height,
                        expected: width * height * 4,
                        actual: buffer.len(),
                    },
                )?;
                pixels.push(pixel);
            }
        }

        Tile::new(tile_size, pixels)
            .ok_or_else(|| invalid_parameter("tile_size", &tile_size, &"must be at least 1"))
    }

    /// The window itself, then flips, then rotations
    fn variants(tile: Tile, settings: ExtractionSettings) -> Vec<Tile> {
        let mut variants = Vec::with_capacity(6);
        if settings.include_flipped {
            variants.push(tile.flip_horizontal());
            variants.push(tile.flip_vertical());
        }
        if settings.include_rotated {
            variants.push(tile.rotate_90());
            variants.push(tile.rotate_180());
            variants.push(tile.rotate_270());
        }
        variants.insert(0, tile);
        variants
    }
}
