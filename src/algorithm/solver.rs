use crate::{
    algorithm::propagation::{narrow_options, schedule_neighbors},
    algorithm::selection::{RandomSelector, min_entropy_group},
    algorithm::steps::{StepQueue, WfcStep},
    io::error::{AlgorithmError, Result, WithContext},
    spatial::grid::{Cell, Grid},
    spatial::pixel::Pixel,
    spatial::tiles::{TileId, TileSet},
};
use ndarray::Array2;

/// What a call to [`WaveFunctionCollapse::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A step was executed and more work may follow
    Progressed(WfcStep),
    /// A pick found every cell collapsed
    Solved,
}

/// Render state of one cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellView {
    /// Whether the cell is resolved
    pub collapsed: bool,
    /// Number of tiles still possible
    pub remaining_options: usize,
    /// Center pixel of the resolved tile, or the mean over open options
    pub color: Pixel,
}

/// Incremental wave function collapse over a grid of cells
///
/// Work is split into small steps held in a double-ended queue. Each call to
/// [`step`](Self::step) executes exactly one of them, so callers decide the
/// pace and can inspect the pending and executed queues between calls.
///
/// Steps:
/// - `PickWithMinEntropy` picks a random cell among those with the fewest
///   options and queues its collapse
/// - `Collapse` fixes a random option and queues entropy recalculation of the
///   open neighbors
/// - `CalculateEntropy` narrows a cell against its neighbors, cascades if it
///   shrank, and jumps the queue with a collapse once one option is left
#[derive(Debug, Clone)]
pub struct WaveFunctionCollapse {
    grid: Grid,
    tiles: TileSet,
    random_selector: RandomSelector,
    pending_steps: StepQueue,
    executed_steps: Vec<WfcStep>,
}

impl WaveFunctionCollapse {
    /// Create a solver over a filled grid
    pub fn new(grid: Grid, tiles: TileSet, seed: u64) -> Self {
        let mut pending_steps = StepQueue::new();
        pending_steps.push_back(WfcStep::PickWithMinEntropy);

        Self {
            grid,
            tiles,
            random_selector: RandomSelector::new(seed),
            pending_steps,
            executed_steps: Vec::new(),
        }
    }

    /// Create a solver whose cells all start with the full tile set
    pub fn from_tiles(tiles: TileSet, width: usize, height: usize, seed: u64) -> Self {
        let mut grid = Grid::new(width, height);
        let all = tiles.all();
        grid.fill(|_, _| Cell::new(all.clone()));
        Self::new(grid, tiles, seed)
    }

    /// The grid being solved
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The tile arena the cells refer to
    pub const fn tiles(&self) -> &TileSet {
        &self.tiles
    }

    /// Work still queued, in execution order
    pub const fn pending_steps(&self) -> &StepQueue {
        &self.pending_steps
    }

    /// Work executed since the current pass started
    pub fn executed_steps(&self) -> &[WfcStep] {
        &self.executed_steps
    }

    /// Whether every cell holds exactly one tile
    pub fn is_fully_collapsed(&self) -> bool {
        self.grid.is_fully_collapsed()
    }

    /// Number of collapsed cells
    pub fn collapsed_count(&self) -> usize {
        self.grid.collapsed_count()
    }

    /// Render state of the cell at `(x, y)`
    ///
    /// # Errors
    ///
    /// Returns `OutOfBounds` outside the grid and `EmptyOptions` for a cell
    /// with nothing left to show
    pub fn cell_view(&self, x: usize, y: usize) -> Result<CellView> {
        let cell = self.grid.get(x, y)?;
        Ok(CellView {
            collapsed: cell.is_collapsed(),
            remaining_options: cell.option_count(),
            color: cell.pixel(&self.tiles).at_position(x, y)?,
        })
    }

    /// Representative color of every cell, indexed `[y, x]`
    ///
    /// # Errors
    ///
    /// Returns `EmptyOptions` if a cell has nothing to show
    pub fn render(&self) -> Result<Array2<Pixel>> {
        self.grid.render(&self.tiles)
    }

    /// Resolved tile of every cell, indexed `[y, x]`
    pub fn collapsed_tiles(&self) -> Array2<Option<TileId>> {
        let mut tiles = Array2::from_elem((self.grid.height(), self.grid.width()), None);
        for ((y, x), tile) in tiles.indexed_iter_mut() {
            *tile = self.grid.get(x, y).ok().and_then(Cell::collapsed_tile);
        }
        tiles
    }

    /// Execute exactly one pending step
    ///
    /// An empty queue starts a new pass: the executed history is cleared and a
    /// pick is scheduled. Once every cell is collapsed each pick reports
    /// [`StepOutcome::Solved`].
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A cell runs out of options (`EmptyOptions`); the solver has no
    ///   rollback, so it must not be stepped again
    /// - A collapse targets a resolved cell (`AlreadyCollapsed`)
    /// - A position is not part of the grid
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.pending_steps.is_empty() {
            self.start_pass();
        }

        let step = self
            .pending_steps
            .pop_front()
            .ok_or(AlgorithmError::NoPendingSteps)?;

        let solved = match step {
            WfcStep::PickWithMinEntropy => self.pick_with_min_entropy()?,
            WfcStep::Collapse { x, y } => {
                self.collapse(x, y)?;
                false
            }
            WfcStep::CalculateEntropy { x, y } => {
                self.calculate_entropy(x, y)?;
                false
            }
        };

        self.executed_steps.push(step);

        Ok(if solved {
            StepOutcome::Solved
        } else {
            StepOutcome::Progressed(step)
        })
    }

    /// Step until the grid is solved
    ///
    /// Returns the number of steps executed, including the final pick.
    ///
    /// # Errors
    ///
    /// Returns the first step error, or `StepLimitExceeded` if `max_steps`
    /// steps did not solve the grid
    pub fn run_to_completion(&mut self, max_steps: usize) -> Result<usize> {
        for executed in 1..=max_steps {
            if self.step()? == StepOutcome::Solved {
                return Ok(executed);
            }
        }

        Err(AlgorithmError::StepLimitExceeded {
            steps: max_steps,
            collapsed: self.collapsed_count(),
            total: self.grid.len(),
        })
    }

    fn start_pass(&mut self) {
        self.executed_steps.clear();
        self.pending_steps.push_back(WfcStep::PickWithMinEntropy);
    }

    // Returns true when there was nothing left to pick
    fn pick_with_min_entropy(&mut self) -> Result<bool> {
        let Some(group) = min_entropy_group(&self.grid) else {
            return Ok(true);
        };

        let cell = self
            .random_selector
            .choose(&group)
            .copied()
            .ok_or(AlgorithmError::CellNotFound)?;
        let (x, y) = self.grid.coordinates_of(cell)?;

        self.pending_steps.push_back(WfcStep::Collapse { x, y });
        Ok(false)
    }

    fn collapse(&mut self, x: usize, y: usize) -> Result<()> {
        let cell = self.grid.get_mut(x, y)?;
        if cell.is_collapsed() {
            return Err(AlgorithmError::AlreadyCollapsed {
                position: Some([x, y]),
            });
        }

        let index = self
            .random_selector
            .choose_index(cell.option_count())
            .ok_or(AlgorithmError::EmptyOptions {
                position: Some([x, y]),
            })?;
        cell.collapse(index).at_position(x, y)?;

        schedule_neighbors(&self.grid, &mut self.pending_steps, x, y)?;
        Ok(())
    }

    fn calculate_entropy(&mut self, x: usize, y: usize) -> Result<()> {
        let cell = self.grid.get(x, y)?;
        if cell.is_collapsed() {
            return Ok(());
        }

        let before = cell.option_count();
        let narrowed = narrow_options(&self.grid, &self.tiles, x, y)?;
        let after = narrowed.count();

        // Rejects an empty set, leaving the cell as it was
        self.grid
            .get_mut(x, y)?
            .reset_options(narrowed)
            .at_position(x, y)?;

        if after < before {
            schedule_neighbors(&self.grid, &mut self.pending_steps, x, y)?;
        }

        if after < 2 {
            self.pending_steps.push_front(WfcStep::Collapse { x, y });
        }

        Ok(())
    }
}
