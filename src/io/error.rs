//! Error types and context management for extraction and solver operations

use std::fmt;
use std::path::PathBuf;

/// Main error type for all extraction and solving operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered grid or animation to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Raw pixel buffer does not match the declared image dimensions
    InvalidImageData {
        /// Declared width in pixels
        width: usize,
        /// Declared height in pixels
        height: usize,
        /// Expected buffer length (`width * height * 4`)
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid access outside of its dimensions
    OutOfBounds {
        /// Requested coordinates (x, y)
        position: [usize; 2],
        /// Grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// A cell reference could not be located in the grid
    ///
    /// Only reachable when a cell that belongs to another grid is looked up.
    CellNotFound,

    /// Collapse requested on a cell that already holds a single tile
    AlreadyCollapsed {
        /// Cell coordinates (x, y), when known
        position: Option<[usize; 2]>,
    },

    /// A cell ran out of tile options (unresolved contradiction)
    EmptyOptions {
        /// Cell coordinates (x, y), when known
        position: Option<[usize; 2]>,
    },

    /// Option index exceeds the cell's remaining options
    InvalidTileIndex {
        /// The invalid option index
        index: usize,
        /// Number of options available
        max_tiles: usize,
    },

    /// The solver found no step to execute
    NoPendingSteps,

    /// The driver gave up before the grid was fully collapsed
    StepLimitExceeded {
        /// Number of steps executed
        steps: usize,
        /// Cells collapsed when the limit was hit
        collapsed: usize,
        /// Total number of cells
        total: usize,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidImageData {
                width,
                height,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "Invalid image data: {width}x{height} image needs {expected} bytes, got {actual}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfBounds {
                position: [x, y],
                dimensions: (width, height),
            } => {
                write!(f, "Position [{x}, {y}] is outside the {width}x{height} grid")
            }
            Self::CellNotFound => write!(f, "Cell not found in grid"),
            Self::AlreadyCollapsed { position } => {
                write!(f, "Cell{} is already collapsed", format_position(*position))
            }
            Self::EmptyOptions { position } => {
                write!(f, "Cell{} has no options left", format_position(*position))
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::NoPendingSteps => write!(f, "No pending steps"),
            Self::StepLimitExceeded {
                steps,
                collapsed,
                total,
            } => {
                write!(
                    f,
                    "Step limit reached after {steps} steps ({collapsed}/{total} cells collapsed)"
                )
            }
        }
    }
}

fn format_position(position: Option<[usize; 2]>) -> String {
    position.map_or_else(String::new, |[x, y]| format!(" [{x}, {y}]"))
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Grid coordinates (x, y) where the error occurred
    pub grid_position: Option<[usize; 2]>,
}

/// Enriches cell-level errors with solver state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the cell position
    ///
    /// # Errors
    ///
    /// Propagates the original error with the position applied
    fn at_position(self, x: usize, y: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Cells do not know where they live; only those errors take a position
            match &mut error {
                AlgorithmError::AlreadyCollapsed { position }
                | AlgorithmError::EmptyOptions { position } => {
                    if position.is_none() {
                        *position = context.grid_position;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn at_position(self, x: usize, y: usize) -> Result<T> {
        self.with_context(ErrorContext {
            grid_position: Some([x, y]),
        })
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
