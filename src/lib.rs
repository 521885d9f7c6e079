//! Seeded wave function collapse over 2D tile grids
//!
//! A grid starts with every cell able to hold any tile from a catalog. The
//! solver repeatedly commits the least certain cell to a weighted-random tile,
//! removes now-impossible tiles from its neighbours, and restarts with the
//! next seed whenever a cell runs out of options. Identical seeds produce
//! identical grids.

#![forbid(unsafe_code)]

/// Solver state machine, candidate sets, selection and propagation
pub mod algorithm;
/// Compilation of example grids into tile catalogs
pub mod analysis;
/// Errors, configuration, command line, progress display and built-in samples
pub mod io;
/// Seeded generators and entropy
pub mod math;
/// Tiles, catalogs, cells, grids and district partitioning
pub mod spatial;

pub use algorithm::executor::{SolvedGrid, SolverConfig, WaveFunction};
pub use io::error::{Result, SolverError};
