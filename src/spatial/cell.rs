//! Per-position collapse state
//!
//! Candidates only ever shrink during an attempt. Once a tile is committed
//! the candidate set is exactly that tile and entropy is zero.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, SolverError};
use crate::math::entropy::weighted_shannon_entropy;
use crate::math::random::RandomSource;
use crate::spatial::catalog::TileCatalog;
use crate::spatial::tiles::{Direction, TileId};

/// One grid position
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    x: usize,
    y: usize,
    candidates: TileBitset,
    committed: Option<TileId>,
    entropy: f64,
}

impl Cell {
    /// Create an uncollapsed cell and compute its initial entropy
    pub fn new(x: usize, y: usize, candidates: TileBitset, catalog: &TileCatalog) -> Self {
        let mut cell = Self {
            x,
            y,
            candidates,
            committed: None,
            entropy: 0.0,
        };
        cell.entropy = cell.calculate_entropy(catalog);
        cell
    }

    /// Grid coordinates `(x, y)`
    pub const fn position(&self) -> (usize, usize) {
        (self.x, self.y)
    }

    /// Remaining candidate tiles
    pub const fn candidates(&self) -> &TileBitset {
        &self.candidates
    }

    /// Committed tile, once collapsed
    pub const fn committed(&self) -> Option<TileId> {
        self.committed
    }

    /// Whether a tile has been committed
    pub const fn is_collapsed(&self) -> bool {
        self.committed.is_some()
    }

    /// Uncollapsed with nothing left to choose from
    pub fn is_contradicted(&self) -> bool {
        self.committed.is_none() && self.candidates.is_empty()
    }

    /// Cached entropy from the last candidate change
    pub const fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Weighted Shannon entropy of the current candidates
    ///
    /// Zero for collapsed cells and empty candidate sets. A candidate set
    /// whose frequencies sum to zero has no defined distribution; it is
    /// reported and treated as zero.
    pub fn calculate_entropy(&self, catalog: &TileCatalog) -> f64 {
        if self.committed.is_some() || self.candidates.is_empty() {
            return 0.0;
        }

        let weights: Vec<u32> = self.candidates.iter().map(|id| catalog.weight_of(id)).collect();
        weighted_shannon_entropy(&weights).unwrap_or_else(|| {
            tracing::warn!(
                x = self.x,
                y = self.y,
                candidates = self.candidates.count(),
                "candidate frequencies sum to zero; entropy treated as 0"
            );
            0.0
        })
    }

    /// Commit to one candidate by weighted draw
    ///
    /// Draws `r` in `[0, Σweights)` and walks candidates in catalog order,
    /// subtracting weights until `r` falls inside a tile's slice.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The candidate set is empty (caller contract violation)
    /// - The candidate weights sum to zero
    /// - The candidate weights exceed the generator's 32-bit range
    pub fn collapse<R: RandomSource + ?Sized>(
        &mut self,
        catalog: &TileCatalog,
        rng: &mut R,
    ) -> Result<TileId> {
        if self.candidates.is_empty() {
            return Err(SolverError::EmptyCandidates {
                x: self.x,
                y: self.y,
            });
        }

        let total = catalog.sum_of_weights(&self.candidates);
        if total == 0 {
            return Err(SolverError::ZeroWeightCandidates {
                x: self.x,
                y: self.y,
            });
        }
        let bound = u32::try_from(total).map_err(|_overflow| {
            crate::io::error::invalid_parameter(
                "frequency",
                &total,
                &"candidate weights must sum below 2^32",
            )
        })?;

        let mut remainder = rng.next_below(bound);
        let mut chosen = None;
        for tile in self.candidates.iter() {
            let weight = catalog.weight_of(tile);
            if remainder < weight {
                chosen = Some(tile);
                break;
            }
            remainder -= weight;
        }

        // remainder < total guarantees a hit; keep a defined fallback anyway
        let tile = chosen
            .or_else(|| self.candidates.iter().last())
            .ok_or(SolverError::EmptyCandidates {
                x: self.x,
                y: self.y,
            })?;

        self.commit(tile);
        Ok(tile)
    }

    /// Commit to a specific tile without a draw
    fn commit(&mut self, tile: TileId) {
        self.committed = Some(tile);
        self.candidates = TileBitset::singleton(self.candidates.capacity(), tile);
        self.entropy = 0.0;
    }

    /// Remove candidates incompatible with committed neighbours
    ///
    /// `neighbours` pairs each committed neighbour tile with its direction
    /// relative to this cell. A candidate survives only if it permits the
    /// neighbour and the neighbour permits it back. Returns `true` if at
    /// least one candidate was removed.
    pub fn apply_constraints(
        &mut self,
        neighbours: impl IntoIterator<Item = (TileId, Direction)>,
        catalog: &TileCatalog,
    ) -> bool {
        if self.committed.is_some() {
            return false;
        }

        let before = self.candidates.count();
        for (neighbour, direction) in neighbours {
            let impossible: Vec<TileId> = self
                .candidates
                .iter()
                .filter(|&candidate| !catalog.is_compatible(candidate, neighbour, direction))
                .collect();
            for tile in impossible {
                self.candidates.remove(tile);
            }
        }

        let changed = self.candidates.count() < before;
        if changed {
            self.entropy = self.calculate_entropy(catalog);
        }
        changed
    }
}
