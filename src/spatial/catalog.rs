//! Compiled input model: tile set, frequencies and the adjacency relation
//!
//! The catalog is built once and read-only while solving. Compatibility is
//! precomputed into one bitset per `(tile, direction)` so the hot propagation
//! path never walks rule lists.

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, SolverError};
use crate::spatial::tiles::{AdjacencyRule, Direction, Tile, TileId};
use std::collections::HashMap;

/// Read-only tile catalog and adjacency model
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tiles: Vec<Tile>,
    /// `allowed[tile][direction]` = tiles the owner permits at that direction
    allowed: Vec<[TileBitset; 4]>,
    names: HashMap<String, TileId>,
}

impl TileCatalog {
    /// Build a catalog from tiles in catalog order
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No tiles are supplied
    /// - A rule references a tile index outside the catalog
    /// - Two tiles share a name
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(SolverError::EmptyCatalog);
        }

        let count = tiles.len();
        let mut names = HashMap::with_capacity(count);
        let mut allowed = Vec::with_capacity(count);

        for (index, tile) in tiles.iter().enumerate() {
            if names.insert(tile.name().to_string(), TileId(index)).is_some() {
                return Err(crate::io::error::invalid_parameter(
                    "tiles",
                    &tile.name(),
                    &"tile names must be unique",
                ));
            }

            let mut per_direction = [
                TileBitset::new(count),
                TileBitset::new(count),
                TileBitset::new(count),
                TileBitset::new(count),
            ];
            for rule in tile.rules() {
                if rule.tile.index() >= count {
                    return Err(SolverError::InvalidTileIndex {
                        index: rule.tile.index(),
                        max_tiles: count,
                    });
                }
                if let Some(slot) = per_direction.get_mut(rule.direction.index()) {
                    slot.insert(rule.tile);
                }
            }
            allowed.push(per_direction);
        }

        Ok(Self {
            tiles,
            allowed,
            names,
        })
    }

    /// Start building a catalog tile by tile
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog has no tiles (never true for a constructed catalog)
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in catalog order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Look up a tile
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    /// Look up a tile id by name
    pub fn find(&self, name: &str) -> Option<TileId> {
        self.names.get(name).copied()
    }

    /// Name of a tile, or an empty string for unknown ids
    pub fn name_of(&self, id: TileId) -> &str {
        self.tile(id).map_or("", Tile::name)
    }

    /// All tile ids in catalog order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(TileId)
    }

    /// Candidate set containing every tile
    pub fn all_tiles(&self) -> TileBitset {
        TileBitset::all(self.tiles.len())
    }

    /// Frequency weight of a tile (zero for unknown ids)
    pub fn weight_of(&self, id: TileId) -> u32 {
        self.tile(id).map_or(0, Tile::frequency)
    }

    /// Sum of frequencies over a tile subset; zero for the empty set
    pub fn sum_of_weights(&self, tiles: &TileBitset) -> u64 {
        tiles.iter().map(|id| u64::from(self.weight_of(id))).sum()
    }

    /// Whether `a` permits `b` at `direction` relative to `a` (one-way)
    pub fn is_allowed(&self, a: TileId, b: TileId, direction: Direction) -> bool {
        self.allowed_neighbours(a, direction)
            .is_some_and(|allowed| allowed.contains(b))
    }

    /// Whether `a` and `b` accept each other with `b` at `direction` from `a`
    pub fn is_compatible(&self, a: TileId, b: TileId, direction: Direction) -> bool {
        self.is_allowed(a, b, direction) && self.is_allowed(b, a, direction.opposite())
    }

    /// Tiles that `tile` permits at `direction`
    pub fn allowed_neighbours(&self, tile: TileId, direction: Direction) -> Option<&TileBitset> {
        self.allowed
            .get(tile.index())
            .and_then(|per_direction| per_direction.get(direction.index()))
    }

    /// Check every rule has its mirror on the other tile
    ///
    /// # Errors
    ///
    /// Returns `AsymmetricAdjacency` naming the first rule (in catalog order)
    /// whose mirror is missing.
    pub fn verify_symmetry(&self) -> Result<()> {
        for a in self.ids() {
            for direction in Direction::ALL {
                let Some(allowed) = self.allowed_neighbours(a, direction) else {
                    continue;
                };
                if let Some(b) = allowed
                    .iter()
                    .find(|&b| !self.is_allowed(b, a, direction.opposite()))
                {
                    return Err(SolverError::AsymmetricAdjacency {
                        tile: self.name_of(a).to_string(),
                        other: self.name_of(b).to_string(),
                        direction,
                    });
                }
            }
        }
        Ok(())
    }

    /// Candidate set for a list of tile names
    ///
    /// # Errors
    ///
    /// Returns an error if a name is not in the catalog
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<TileBitset> {
        let mut subset = TileBitset::new(self.len());
        for name in names {
            let id = self.find(name).ok_or_else(|| {
                crate::io::error::invalid_parameter("preset", &name, &"unknown tile name")
            })?;
            subset.insert(id);
        }
        Ok(subset)
    }
}

/// Incremental catalog construction by tile name
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    tiles: Vec<Tile>,
    names: HashMap<String, TileId>,
}

impl CatalogBuilder {
    /// Add a tile, or raise the frequency of an existing one
    pub fn tile(&mut self, name: &str, frequency: u32) -> TileId {
        if let Some(&id) = self.names.get(name) {
            if let Some(tile) = self.tiles.get_mut(id.index()) {
                tile.add_frequency(frequency);
            }
            return id;
        }

        let id = TileId(self.tiles.len());
        self.tiles.push(Tile::new(name, frequency));
        self.names.insert(name.to_string(), id);
        id
    }

    /// `b` may sit at `direction` relative to `a` (one-way rule on `a`)
    pub fn allow(&mut self, a: TileId, b: TileId, direction: Direction) -> &mut Self {
        if let Some(tile) = self.tiles.get_mut(a.index()) {
            tile.push_rule(AdjacencyRule::new(b, direction));
        }
        self
    }

    /// Rule on `a` plus its mirror on `b`
    pub fn allow_symmetric(&mut self, a: TileId, b: TileId, direction: Direction) -> &mut Self {
        self.allow(a, b, direction).allow(b, a, direction.opposite())
    }

    /// Symmetric rules for `a` and `b` in all four directions
    pub fn allow_everywhere(&mut self, a: TileId, b: TileId) -> &mut Self {
        for direction in Direction::ALL {
            self.allow_symmetric(a, b, direction);
        }
        self
    }

    /// Finish the catalog
    ///
    /// # Errors
    ///
    /// Propagates validation errors from [`TileCatalog::new`]
    pub fn build(self) -> Result<TileCatalog> {
        TileCatalog::new(self.tiles)
    }
}
