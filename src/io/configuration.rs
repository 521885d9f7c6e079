//! Solver constants and runtime configuration defaults

// Default values for configurable parameters
/// Seed used when none is supplied
pub const DEFAULT_SEED: i32 = 133_321;

/// Default number of seed-incremented restarts before giving up
pub const DEFAULT_ITERATION_LIMIT: usize = 100;

/// Default grid width in cells
pub const DEFAULT_WIDTH: usize = 24;

/// Default grid height in cells
pub const DEFAULT_HEIGHT: usize = 16;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// District partitioning
/// Lower edge of the split-point band as a fraction of the axis length
pub const PARTITION_LOWER_FRACTION: f64 = 0.33;
/// Upper edge of the split-point band as a fraction of the axis length
pub const PARTITION_UPPER_FRACTION: f64 = 0.45;
/// Preset count that triggers district partitioning
pub const MAX_PRESETS: usize = 3;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
