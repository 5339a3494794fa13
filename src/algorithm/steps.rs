//! Units of solver work and the double-ended queue that schedules them

use std::collections::VecDeque;
use std::fmt;

/// One unit of solver work
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WfcStep {
    /// Choose a random cell among those with the fewest options
    PickWithMinEntropy,
    /// Resolve the cell at `(x, y)` to one of its options
    Collapse {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },
    /// Narrow the options at `(x, y)` using its neighbors
    CalculateEntropy {
        /// Column
        x: usize,
        /// Row
        y: usize,
    },
}

impl fmt::Display for WfcStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PickWithMinEntropy => write!(f, "Pick"),
            Self::Collapse { x, y } => write!(f, "Collapse [{x}, {y}]"),
            Self::CalculateEntropy { x, y } => write!(f, "Calculate entropy [{x}, {y}]"),
        }
    }
}

/// Pending solver work
///
/// Entropy recalculations are appended; forced collapses are pushed to the
/// front so they run next.
#[derive(Debug, Clone, Default)]
pub struct StepQueue {
    steps: VecDeque<WfcStep>,
}

impl StepQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a step after all pending work
    pub fn push_back(&mut self, step: WfcStep) {
        self.steps.push_back(step);
    }

    /// Schedule a step ahead of all pending work
    pub fn push_front(&mut self, step: WfcStep) {
        self.steps.push_front(step);
    }

    /// Take the next step
    pub fn pop_front(&mut self) -> Option<WfcStep> {
        self.steps.pop_front()
    }

    /// Whether `step` is already scheduled
    pub fn contains(&self, step: &WfcStep) -> bool {
        self.steps.contains(step)
    }

    /// Pending steps in execution order
    pub fn iter(&self) -> impl Iterator<Item = &WfcStep> + '_ {
        self.steps.iter()
    }

    /// Number of pending steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing is scheduled
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
