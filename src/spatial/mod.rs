//! Spatial data structures
//!
//! This module contains:
//! - Tile identities, directions and adjacency rules
//! - The read-only tile catalog
//! - Per-position cells and the grid that owns them
//! - District partitioning

/// Read-only tile catalog and adjacency model
pub mod catalog;
/// Per-position collapse state
pub mod cell;
/// Grid of cells with neighbour lookup
pub mod grid;
/// Three-way district partitioning
pub mod partition;
/// Tile, direction and adjacency rule types
pub mod tiles;

pub use grid::Grid;
