use crate::{
    algorithm::bitset::TileBitset,
    algorithm::steps::{StepQueue, WfcStep},
    io::error::Result,
    spatial::grid::Grid,
    spatial::tiles::{Direction, TileSet},
};

/// Grid-adjacent positions of `(x, y)` in propagation order (top, right, bottom, left)
pub fn neighbor_positions(
    grid: &Grid,
    x: usize,
    y: usize,
) -> impl Iterator<Item = (Direction, usize, usize)> {
    let (width, height) = (grid.width(), grid.height());
    Direction::ALL.into_iter().filter_map(move |direction| {
        direction
            .step(x, y, width, height)
            .map(|(nx, ny)| (direction, nx, ny))
    })
}

/// Queue entropy recalculation for the open neighbors of `(x, y)`
///
/// Collapsed neighbors and neighbors that already have a pending
/// recalculation are skipped. Returns how many steps were queued.
///
/// # Errors
///
/// Returns `OutOfBounds` if a neighbor cannot be read
pub fn schedule_neighbors(
    grid: &Grid,
    pending: &mut StepQueue,
    x: usize,
    y: usize,
) -> Result<usize> {
    let mut queued = 0;
    for (_, nx, ny) in neighbor_positions(grid, x, y) {
        if grid.get(nx, ny)?.is_collapsed() {
            continue;
        }

        let step = WfcStep::CalculateEntropy { x: nx, y: ny };
        if !pending.contains(&step) {
            pending.push_back(step);
            queued += 1;
        }
    }
    Ok(queued)
}

/// One bounded arc-consistency pass over the cell at `(x, y)`
///
/// Starting from the cell's current options, every existing neighbor removes
/// the tiles none of its own options allow on the shared side. Neighbors are
/// read as they are now; no fixpoint is sought here, the queue carries the
/// cascade across later steps.
///
/// # Errors
///
/// Returns `OutOfBounds` if the cell or a neighbor cannot be read
pub fn narrow_options(grid: &Grid, tiles: &TileSet, x: usize, y: usize) -> Result<TileBitset> {
    let options = grid.get(x, y)?.options().clone();

    neighbor_positions(grid, x, y).try_fold(options, |options, (direction, nx, ny)| {
        let neighbor = grid.get(nx, ny)?;
        // Tiles the neighbor allows on the side facing back at this cell
        let reachable = tiles.reachable(neighbor.options(), direction.opposite());
        Ok(options.intersection(&reachable))
    })
}
