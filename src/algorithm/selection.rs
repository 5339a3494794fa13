//! Seeded random choices and lowest-entropy cell grouping

use crate::spatial::grid::{Cell, Grid};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::BTreeMap;
use std::ops::ControlFlow;

/// Seeded random selector for reproducible stochastic choices
///
/// The same seed yields the same sequence of picks, so two solvers built from
/// the same tiles and grid size collapse identically.
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform index in `0..len`, or `None` when `len` is zero
    pub fn choose_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly pick one element of `items`
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.choose_index(items.len())
            .and_then(|index| items.get(index))
    }
}

/// Open cells partitioned by option count, in row-major order within a group
pub fn entropy_groups(grid: &Grid) -> BTreeMap<usize, Vec<&Cell>> {
    let mut groups: BTreeMap<usize, Vec<&Cell>> = BTreeMap::new();
    grid.for_each(|cell, _, _| {
        if !cell.is_collapsed() {
            groups.entry(cell.option_count()).or_default().push(cell);
        }
        ControlFlow::Continue(())
    });
    groups
}

/// Open cells sharing the lowest option count
///
/// Returns `None` once every cell is collapsed.
pub fn min_entropy_group(grid: &Grid) -> Option<Vec<&Cell>> {
    entropy_groups(grid).into_values().next()
}
