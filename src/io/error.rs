//! Error types for catalog validation, solving and parameter checking

use crate::spatial::tiles::Direction;
use std::fmt;

/// Main error type for all solver operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// Algorithm parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile index exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile index
        index: usize,
        /// Number of tiles in the catalog
        max_tiles: usize,
    },

    /// A catalog with no tiles cannot seed any cell
    EmptyCatalog,

    /// Coordinates fall outside the grid
    OutOfBounds {
        /// Column of the requested cell
        x: usize,
        /// Row of the requested cell
        y: usize,
    },

    /// Collapse was requested on a cell with no remaining candidates
    ///
    /// This is a caller contract violation: the solver checks satisfiability
    /// before selecting, so reaching it indicates a logic error upstream.
    EmptyCandidates {
        /// Column of the offending cell
        x: usize,
        /// Row of the offending cell
        y: usize,
    },

    /// Every remaining candidate has frequency zero
    ZeroWeightCandidates {
        /// Column of the offending cell
        x: usize,
        /// Row of the offending cell
        y: usize,
    },

    /// Tile allows a neighbour that does not allow it back
    AsymmetricAdjacency {
        /// Name of the tile declaring the rule
        tile: String,
        /// Name of the neighbour tile
        other: String,
        /// Direction of the neighbour relative to `tile`
        direction: Direction,
    },

    /// Contradictions persisted through every permitted restart
    RetryBudgetExhausted {
        /// Number of attempts made, including the first
        attempts: usize,
        /// Seed used by the final attempt
        last_seed: i32,
    },
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (tiles: {max_tiles})")
            }
            Self::EmptyCatalog => write!(f, "Tile catalog contains no tiles"),
            Self::OutOfBounds { x, y } => write!(f, "Cell ({x}, {y}) is outside the grid"),
            Self::EmptyCandidates { x, y } => {
                write!(f, "Cannot collapse cell ({x}, {y}): no candidates remain")
            }
            Self::ZeroWeightCandidates { x, y } => {
                write!(
                    f,
                    "Cannot collapse cell ({x}, {y}): candidate frequencies sum to zero"
                )
            }
            Self::AsymmetricAdjacency {
                tile,
                other,
                direction,
            } => {
                write!(
                    f,
                    "Tile '{tile}' allows '{other}' to the {direction} but '{other}' does not allow '{tile}' to the {}",
                    direction.opposite()
                )
            }
            Self::RetryBudgetExhausted {
                attempts,
                last_seed,
            } => {
                write!(
                    f,
                    "No solution found within {attempts} attempts (last seed {last_seed})"
                )
            }
        }
    }
}

impl std::error::Error for SolverError {}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, SolverError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SolverError {
    SolverError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
