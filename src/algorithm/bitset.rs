use crate::spatial::tiles::TileId;
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over catalog tile indices
///
/// Used for cell candidate sets, presets and per-direction compatibility
/// tables. Iteration always yields tiles in catalog order, which is what
/// makes weighted collapse deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
        }
    }

    /// Create a bitset containing all possible tiles
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
        }
    }

    /// Create a bitset holding exactly one tile
    pub fn singleton(max_tiles: usize, tile: TileId) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Number of tiles the set can address
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile, ignoring indices beyond capacity
    pub fn insert(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), true);
        }
    }

    /// Remove a tile, returning whether it was present
    pub fn remove(&mut self, tile: TileId) -> bool {
        if tile.index() < self.bits.len() {
            self.bits.replace(tile.index(), false)
        } else {
            false
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Add every tile of `other` to this set
    pub fn union_with(&mut self, other: &Self) {
        self.bits |= &other.bits;
    }

    /// Whether every member of this set is also in `other`
    pub fn is_subset(&self, other: &Self) -> bool {
        self.iter().all(|tile| other.contains(tile))
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The single member, if the set holds exactly one tile
    pub fn only(&self) -> Option<TileId> {
        let mut ones = self.bits.iter_ones();
        match (ones.next(), ones.next()) {
            (Some(index), None) => Some(TileId(index)),
            _ => None,
        }
    }

    /// Iterate members in catalog order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId)
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }

    /// Build a set from tile ids
    pub fn from_tiles(tiles: impl IntoIterator<Item = TileId>, max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        for tile in tiles {
            bitset.insert(tile);
        }
        bitset
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<usize> = self.iter().map(TileId::index).collect();
        write!(f, "TileBitset({} tiles: {members:?})", self.count())
    }
}
