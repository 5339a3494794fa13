//! Input/output, configuration and error handling

/// Command-line interface and run driver
pub mod cli;
/// Runtime defaults and safety limits
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// PNG export of rendered grids
pub mod image;
/// Terminal progress reporting
pub mod progress;
/// Animated GIF capture of the solve
pub mod visualization;
