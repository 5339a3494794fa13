//! Tile-based wave function collapse with a step-wise, inspectable solver
//!
//! Square tiles are sampled from a source image, optionally expanded with
//! their mirrored and rotated variants, and linked by a pixel-overlap
//! adjacency rule. The solver then fills a grid one small step at a time:
//! picking a lowest-entropy cell, collapsing it and narrowing its neighbors,
//! with the pending and executed steps exposed for visualization.

#![forbid(unsafe_code)]

/// Wave function collapse solver, step queue and constraint propagation
pub mod algorithm;
/// Source image processing and tile extraction
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Pixels, tiles and the output grid
pub mod spatial;

pub use algorithm::solver::{CellView, StepOutcome, WaveFunctionCollapse};
pub use algorithm::steps::WfcStep;
pub use analysis::extraction::{ExtractionSettings, TileExtractor};
pub use io::error::{AlgorithmError, Result};
