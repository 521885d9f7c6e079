//! Input/output, configuration and error handling

/// Command-line interface
pub mod cli;
/// Solver constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Terminal progress display
pub mod progress;
/// Built-in district example models
pub mod samples;
