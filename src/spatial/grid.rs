//! Output grid of cells, each holding the tiles still possible at its position
//!
//! Cells are stored in an `ndarray` matrix indexed `[y, x]`. Every accessor is
//! bounds-checked and reports `OutOfBounds` rather than panicking, so a bad
//! coordinate aborts the solver step that produced it.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, WithContext};
use crate::spatial::pixel::Pixel;
use crate::spatial::tiles::{TileId, TileSet};
use ndarray::Array2;
use std::ops::ControlFlow;

/// Candidate tiles for one grid position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    options: TileBitset,
    collapsed: bool,
}

impl Cell {
    /// Create an unresolved cell with the given options
    pub const fn new(options: TileBitset) -> Self {
        Self {
            options,
            collapsed: false,
        }
    }

    /// Current option set
    pub const fn options(&self) -> &TileBitset {
        &self.options
    }

    /// Remaining option count (the entropy proxy)
    pub fn option_count(&self) -> usize {
        self.options.count()
    }

    /// Whether the cell has been resolved to a single tile
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Replace the option set of an unresolved cell
    ///
    /// # Errors
    ///
    /// Returns `AlreadyCollapsed` if the cell is resolved, and `EmptyOptions`
    /// if `options` is empty (the cell is left untouched in both cases).
    pub fn reset_options(&mut self, options: TileBitset) -> Result<()> {
        if self.collapsed {
            return Err(AlgorithmError::AlreadyCollapsed { position: None });
        }
        if options.is_empty() {
            return Err(AlgorithmError::EmptyOptions { position: None });
        }
        self.options = options;
        Ok(())
    }

    /// Keep only the `index`-th option and mark the cell resolved
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cell is already collapsed
    /// - The cell has no options
    /// - `index` is not below the option count
    pub fn collapse(&mut self, index: usize) -> Result<TileId> {
        if self.collapsed {
            return Err(AlgorithmError::AlreadyCollapsed { position: None });
        }
        if self.options.is_empty() {
            return Err(AlgorithmError::EmptyOptions { position: None });
        }

        let tile = self
            .options
            .nth(index)
            .ok_or(AlgorithmError::InvalidTileIndex {
                index,
                max_tiles: self.options.count(),
            })?;

        self.options = TileBitset::single(tile, self.options.capacity());
        self.collapsed = true;
        Ok(tile)
    }

    /// The tile a collapsed cell resolved to
    pub fn collapsed_tile(&self) -> Option<TileId> {
        if self.collapsed {
            self.options.nth(0)
        } else {
            None
        }
    }

    /// Representative color of the cell
    ///
    /// A collapsed cell shows its tile's center pixel; an open cell shows the
    /// mean of its options' center pixels.
    ///
    /// # Errors
    ///
    /// Returns `EmptyOptions` if no option maps to a tile in `tiles`
    pub fn pixel(&self, tiles: &TileSet) -> Result<Pixel> {
        Pixel::mean(
            self.options
                .iter()
                .filter_map(|id| tiles.get(id))
                .map(crate::spatial::tiles::Tile::center_pixel),
        )
        .ok_or(AlgorithmError::EmptyOptions { position: None })
    }
}

/// Row-major grid of cells, addressed by `(x, y)`
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a grid of empty cells; call [`Grid::fill`] before solving
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::default((height, width)),
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Grid height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn out_of_bounds(&self, x: usize, y: usize) -> AlgorithmError {
        AlgorithmError::OutOfBounds {
            position: [x, y],
            dimensions: (self.cells.dim().1, self.cells.dim().0),
        }
    }

    /// Cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Result<&Cell> {
        self.cells
            .get((y, x))
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Mutable cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn get_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell> {
        let error = self.out_of_bounds(x, y);
        self.cells.get_mut((y, x)).ok_or(error)
    }

    /// Replace the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> Result<()> {
        *self.get_mut(x, y)? = cell;
        Ok(())
    }

    /// Initialize every position from a factory
    pub fn fill<F>(&mut self, mut factory: F)
    where
        F: FnMut(usize, usize) -> Cell,
    {
        for ((y, x), cell) in self.cells.indexed_iter_mut() {
            *cell = factory(x, y);
        }
    }

    /// Visit cells in row-major order until the callback breaks
    pub fn for_each<'a, F>(&'a self, mut callback: F)
    where
        F: FnMut(&'a Cell, usize, usize) -> ControlFlow<()>,
    {
        for ((y, x), cell) in self.cells.indexed_iter() {
            if callback(cell, x, y).is_break() {
                break;
            }
        }
    }

    /// Coordinates of a cell that lives in this grid
    ///
    /// # Errors
    ///
    /// Returns `CellNotFound` if `cell` is not one of this grid's cells
    pub fn coordinates_of(&self, cell: &Cell) -> Result<(usize, usize)> {
        let mut found = None;
        self.for_each(|candidate, x, y| {
            if std::ptr::eq(candidate, cell) {
                found = Some((x, y));
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        found.ok_or(AlgorithmError::CellNotFound)
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Whether every cell is collapsed
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Representative color of every cell, indexed `[y, x]`
    ///
    /// # Errors
    ///
    /// Returns `EmptyOptions` with the position of the first cell that has
    /// nothing to show
    pub fn render(&self, tiles: &TileSet) -> Result<Array2<Pixel>> {
        let mut image = Array2::default(self.cells.dim());
        for (((y, x), cell), pixel) in self.cells.indexed_iter().zip(image.iter_mut()) {
            *pixel = cell.pixel(tiles).at_position(x, y)?;
        }
        Ok(image)
    }
}
