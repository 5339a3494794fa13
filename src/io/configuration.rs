//! Runtime configuration defaults and safety limits

/// Side length of extracted tiles
pub const DEFAULT_TILE_SIZE: usize = 3;

// Largest window the extractor accepts; adjacency checks are quadratic in tile count
/// Maximum allowed tile size
pub const MAX_TILE_SIZE: usize = 16;

/// Default output width in cells
pub const DEFAULT_OUTPUT_WIDTH: usize = 32;

/// Default output height in cells
pub const DEFAULT_OUTPUT_HEIGHT: usize = 32;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 54;

/// Default number of solver steps before the driver gives up
pub const DEFAULT_MAX_STEPS: usize = 1_000_000;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Solver steps between progress bar refreshes
pub const PROGRESS_REFRESH_STEPS: usize = 64;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_wfc";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upscaling factor for rendered frames so small grids stay visible
pub const VISUALIZATION_SCALE: u32 = 4;
