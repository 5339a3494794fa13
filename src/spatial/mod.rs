//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Pixel values sampled from the source image
//! - Tiles, their symmetry transforms and adjacency sets
//! - The output grid of cells

/// Output grid and per-position cell state
pub mod grid;
/// RGB pixel values
pub mod pixel;
/// Tile data structures and adjacency rules
pub mod tiles;

pub use grid::{Cell, Grid};
pub use pixel::Pixel;
pub use tiles::{Direction, Tile, TileSet};
