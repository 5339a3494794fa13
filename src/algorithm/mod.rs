/// Fixed-size bitsets over the tile arena
pub mod bitset;
/// Bounded constraint propagation between neighboring cells
pub mod propagation;
/// Seeded random choices and lowest-entropy grouping
pub mod selection;
/// Step-wise wave function collapse state machine
pub mod solver;
/// Solver work units and their queue
pub mod steps;
