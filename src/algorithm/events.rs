//! Observable solver events and per-step results

use std::fmt;

use crate::spatial::tiles::TileId;

/// Something a host may want to visualise or record
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverEvent {
    /// A cell committed to a tile
    CellCollapsed {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Committed tile
        tile: TileId,
    },
    /// Propagation removed candidates from a cell
    CellConstrained {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Candidates left afterwards
        remaining: usize,
    },
    /// The attempt with this seed became unsatisfiable
    ContradictionDetected {
        /// Seed of the failed attempt
        seed: i32,
    },
    /// Every cell is committed
    Finished {
        /// Seed that produced the grid
        seed: i32,
    },
}

impl fmt::Display for SolverEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CellCollapsed { x, y, tile } => write!(f, "({x}, {y}) collapsed to {tile}"),
            Self::CellConstrained { x, y, remaining } => {
                write!(f, "({x}, {y}) constrained to {remaining} candidates")
            }
            Self::ContradictionDetected { seed } => write!(f, "contradiction with seed {seed}"),
            Self::Finished { seed } => write!(f, "finished with seed {seed}"),
        }
    }
}

/// Outcome of one call to `WaveFunction::step`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepResult {
    /// A fresh grid was built and its first cell collapsed
    Initialized {
        /// Seed of the new attempt
        seed: i32,
    },
    /// One propagation pass ran
    Propagated {
        /// Cells that lost candidates
        constrained: usize,
    },
    /// The lowest-entropy cell was collapsed
    Collapsed {
        /// Column
        x: usize,
        /// Row
        y: usize,
        /// Committed tile
        tile: TileId,
    },
    /// The grid became unsatisfiable; the next step restarts
    Contradicted {
        /// Seed of the failed attempt
        seed: i32,
    },
    /// A new attempt was scheduled with the next seed
    Restarted {
        /// Seed of the upcoming attempt
        seed: i32,
    },
    /// Terminal: every cell is committed
    Finished {
        /// Seed that produced the grid
        seed: i32,
    },
    /// Nothing to do: idle, paused or already terminal
    Waiting,
}

impl StepResult {
    /// Whether the solver can make no further progress without a new run
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}
