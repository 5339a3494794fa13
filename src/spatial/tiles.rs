//! Square pixel tiles, their symmetry transforms and adjacency rules
//!
//! Tiles are stored in a `TileSet` arena and refer to each other by index.
//! Each tile keeps one neighbor bitset per direction, filled once the set is
//! final so the adjacency graph never points at tiles that were later
//! deduplicated away.

use crate::algorithm::bitset::TileBitset;
use crate::spatial::pixel::Pixel;
use std::fmt;

/// Index of a tile inside its `TileSet`
pub type TileId = usize;

/// One of the four grid-adjacent directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards smaller `y`
    Top,
    /// Towards larger `x`
    Right,
    /// Towards larger `y`
    Bottom,
    /// Towards smaller `x`
    Left,
}

impl Direction {
    /// All directions in propagation order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The direction pointing back
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Slot of this direction in per-direction arrays
    pub const fn index(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Right => 1,
            Self::Bottom => 2,
            Self::Left => 3,
        }
    }

    /// Step from `(x, y)` in this direction, if it stays inside `width x height`
    pub const fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        match self {
            Self::Top if y > 0 => Some((x, y - 1)),
            Self::Right if x + 1 < width => Some((x + 1, y)),
            Self::Bottom if y + 1 < height => Some((x, y + 1)),
            Self::Left if x > 0 => Some((x - 1, y)),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        };
        write!(f, "{name}")
    }
}

/// A square block of pixels, stored row-major
///
/// Equality and hashing only look at the pixels; cached neighbor sets are
/// derived data.
#[derive(Debug, Clone)]
pub struct Tile {
    size: usize,
    pixels: Vec<Pixel>,
    neighbors: [TileBitset; 4],
}

impl PartialEq for Tile {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.pixels == other.pixels
    }
}

impl Eq for Tile {}

impl std::hash::Hash for Tile {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.size.hash(state);
        self.pixels.hash(state);
    }
}

impl Tile {
    /// Build a tile from `size * size` row-major pixels
    ///
    /// Returns `None` if the pixel count does not match the size.
    pub fn new(size: usize, pixels: Vec<Pixel>) -> Option<Self> {
        (size > 0 && pixels.len() == size * size).then(|| Self {
            size,
            pixels,
            neighbors: Default::default(),
        })
    }

    /// Side length in pixels
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major pixel data
    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// Pixel at `(x, y)` inside the tile
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x >= self.size || y >= self.size {
            return None;
        }
        self.pixels.get(y * self.size + x).copied()
    }

    /// Pixel used to represent the tile in a rendered grid
    pub fn center_pixel(&self) -> Pixel {
        self.pixels
            .get(self.pixels.len() / 2)
            .copied()
            .unwrap_or_default()
    }

    // Every transform resamples the source through a coordinate map
    fn remap(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Self {
        let n = self.size;
        let mut pixels = Vec::with_capacity(n * n);
        for y in 0..n {
            for x in 0..n {
                let (sx, sy) = source(x, y);
                pixels.push(self.pixel(sx, sy).unwrap_or_default());
            }
        }
        Self {
            size: n,
            pixels,
            neighbors: Default::default(),
        }
    }

    /// Mirror across the vertical axis
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        let last = self.size - 1;
        self.remap(|x, y| (last - x, y))
    }

    /// Mirror across the horizontal axis
    #[must_use]
    pub fn flip_vertical(&self) -> Self {
        let last = self.size - 1;
        self.remap(|x, y| (x, last - y))
    }

    /// Rotate by 90 degrees
    #[must_use]
    pub fn rotate_90(&self) -> Self {
        let last = self.size - 1;
        self.remap(|x, y| (y, last - x))
    }

    /// Rotate by 180 degrees
    #[must_use]
    pub fn rotate_180(&self) -> Self {
        let last = self.size - 1;
        self.remap(|x, y| (last - x, last - y))
    }

    /// Rotate by 270 degrees
    #[must_use]
    pub fn rotate_270(&self) -> Self {
        let last = self.size - 1;
        self.remap(|x, y| (last - y, x))
    }

    /// Test whether `other` may sit next to this tile in `direction`
    ///
    /// The half of this tile facing `direction` (`ceil(size / 2)` rows or
    /// columns) must match the opposing half of `other` pixel for pixel.
    /// Tiles of different sizes are never compatible.
    pub fn is_compatible(&self, other: &Self, direction: Direction) -> bool {
        if self.size != other.size {
            return false;
        }

        let n = self.size;
        let band = n.div_ceil(2);
        let far = n - band;

        // (own offset, other offset) along the axis being compared
        let (own, theirs) = match direction {
            Direction::Top | Direction::Left => (0, far),
            Direction::Bottom | Direction::Right => (far, 0),
        };

        for along in 0..band {
            for across in 0..n {
                let (a, b) = match direction {
                    Direction::Top | Direction::Bottom => (
                        self.pixel(across, own + along),
                        other.pixel(across, theirs + along),
                    ),
                    Direction::Left | Direction::Right => (
                        self.pixel(own + along, across),
                        other.pixel(theirs + along, across),
                    ),
                };
                if a != b {
                    return false;
                }
            }
        }
        true
    }

    /// Tiles of `all_tiles` compatible with this one in `direction`
    pub fn compatible_within(&self, all_tiles: &[Self], direction: Direction) -> TileBitset {
        let mut set = TileBitset::new(all_tiles.len());
        for (id, candidate) in all_tiles.iter().enumerate() {
            if self.is_compatible(candidate, direction) {
                set.insert(id);
            }
        }
        set
    }

    /// Cached neighbor set for `direction`
    ///
    /// Empty until the owning `TileSet` has filled neighbors.
    pub const fn neighbors(&self, direction: Direction) -> &TileBitset {
        &self.neighbors[direction.index()]
    }
}

/// Arena of unique tiles with their adjacency sets
#[derive(Debug, Clone, Default)]
pub struct TileSet {
    tiles: Vec<Tile>,
}

impl TileSet {
    /// Wrap tiles and compute their adjacency against the whole set
    pub fn new(tiles: Vec<Tile>) -> Self {
        let mut set = Self { tiles };
        set.fill_neighbors();
        set
    }

    /// Wrap tiles without computing adjacency
    ///
    /// Neighbor sets stay empty until [`TileSet::fill_neighbors`] runs.
    pub const fn new_unlinked(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Recompute every tile's four neighbor sets against the current set
    ///
    /// Existing neighbor sets are overwritten, never extended.
    pub fn fill_neighbors(&mut self) {
        for id in 0..self.tiles.len() {
            self.fill_neighbors_of(id);
        }
    }

    /// Recompute the neighbor sets of a single tile
    pub fn fill_neighbors_of(&mut self, id: TileId) {
        let Some(tile) = self.tiles.get(id) else {
            return;
        };
        let computed = Direction::ALL.map(|direction| tile.compatible_within(&self.tiles, direction));
        if let Some(tile) = self.tiles.get_mut(id) {
            tile.neighbors = computed;
        }
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// All tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Option set holding every tile
    pub fn all(&self) -> TileBitset {
        TileBitset::all(self.tiles.len())
    }

    /// Tiles that may sit in `direction` of at least one member of `options`
    pub fn reachable(&self, options: &TileBitset, direction: Direction) -> TileBitset {
        let mut reachable = TileBitset::new(self.tiles.len());
        for id in options.iter() {
            if let Some(tile) = self.tiles.get(id) {
                reachable.union_with(tile.neighbors(direction));
            }
        }
        reachable
    }
}
