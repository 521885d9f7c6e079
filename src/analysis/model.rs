//! Compilation of example grids into a tile catalog
//!
//! An example grid is a small hand-authored arrangement of tiles. Every tile
//! that appears gains one unit of frequency per occurrence, and every pair of
//! von Neumann neighbours observed in the example becomes an adjacency rule.
//! Because each pair is seen from both sides, compiled rules are symmetric.
//!
//! Several examples can be compiled into one catalog. Tiles are unified by
//! name, their frequencies summed and their rules unioned, and each example's
//! own tile set is kept as a preset for district partitioning.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{Result, SolverError};
use crate::spatial::catalog::{CatalogBuilder, TileCatalog};
use crate::spatial::tiles::{Direction, TileId};

/// Hand-authored arrangement of named tiles
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExampleGrid {
    names: Vec<String>,
    /// Index into `names` per cell, indexed `[y, x]`
    cells: Array2<usize>,
}

impl ExampleGrid {
    /// Create an example from a tile palette and a grid of palette indices
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette is empty
    /// - A cell references an index outside the palette
    pub fn new(names: &[&str], cells: Array2<usize>) -> Result<Self> {
        if names.is_empty() {
            return Err(SolverError::EmptyCatalog);
        }
        if let Some(&index) = cells.iter().find(|&&index| index >= names.len()) {
            return Err(SolverError::InvalidTileIndex {
                index,
                max_tiles: names.len(),
            });
        }

        Ok(Self {
            names: names.iter().map(ToString::to_string).collect(),
            cells,
        })
    }

    /// Build an example from text rows, one character per cell
    ///
    /// `legend` maps each character to a tile name.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Rows differ in length or there are none
    /// - A character is missing from the legend
    pub fn from_rows(rows: &[&str], legend: &[(char, &str)]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 {
            return Err(crate::io::error::invalid_parameter(
                "rows",
                &format!("{width}x{height}"),
                &"example must have at least one cell",
            ));
        }

        let names: Vec<&str> = legend.iter().map(|&(_, name)| name).collect();
        let mut indices = Vec::with_capacity(width * height);
        for row in rows {
            if row.chars().count() != width {
                return Err(crate::io::error::invalid_parameter(
                    "rows",
                    row,
                    &"all rows must have the same length",
                ));
            }
            for glyph in row.chars() {
                let index = legend
                    .iter()
                    .position(|&(symbol, _)| symbol == glyph)
                    .ok_or_else(|| {
                        crate::io::error::invalid_parameter(
                            "legend",
                            &glyph,
                            &"character has no tile",
                        )
                    })?;
                indices.push(index);
            }
        }

        let cells = Array2::from_shape_vec((height, width), indices).map_err(|error| {
            crate::io::error::invalid_parameter("rows", &format!("{width}x{height}"), &error)
        })?;
        Self::new(&names, cells)
    }

    /// Width in cells
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Height in cells
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Tile name at `(x, y)`
    pub fn name_at(&self, x: usize, y: usize) -> Option<&str> {
        self.cells
            .get([y, x])
            .and_then(|&index| self.names.get(index))
            .map(String::as_str)
    }
}

/// Catalog compiled from one or more examples, plus one preset per example
#[derive(Clone, Debug)]
pub struct CompiledModels {
    /// Union of every example's tiles
    pub catalog: TileCatalog,
    /// Tiles used by each example, in the order examples were added
    pub presets: Vec<TileBitset>,
}

/// Accumulates examples into a single catalog
#[derive(Debug, Default)]
pub struct ModelCompiler {
    builder: CatalogBuilder,
    used: Vec<Vec<TileId>>,
}

impl ModelCompiler {
    /// Create an empty compiler
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an example's tiles, frequencies and observed adjacencies in
    pub fn add_example(&mut self, example: &ExampleGrid) -> &mut Self {
        let (width, height) = (example.width(), example.height());
        let mut used = Vec::new();

        for ((y, x), _) in example.cells.indexed_iter() {
            let Some(name) = example.name_at(x, y) else {
                continue;
            };
            let tile = self.builder.tile(name, 1);
            if !used.contains(&tile) {
                used.push(tile);
            }

            for direction in Direction::ALL {
                let Some((nx, ny)) = direction.step(x, y, width, height) else {
                    continue;
                };
                if let Some(neighbour_name) = example.name_at(nx, ny) {
                    let neighbour = self.builder.tile(neighbour_name, 0);
                    self.builder.allow(tile, neighbour, direction);
                }
            }
        }

        tracing::debug!(
            width,
            height,
            distinct_tiles = used.len(),
            "example compiled into model"
        );
        self.used.push(used);
        self
    }

    /// Finish compilation
    ///
    /// # Errors
    ///
    /// Returns `EmptyCatalog` if no example contributed a tile, or propagates
    /// catalog validation errors
    pub fn finish(self) -> Result<CompiledModels> {
        let catalog = self.builder.build()?;
        let presets = self
            .used
            .iter()
            .map(|tiles| TileBitset::from_tiles(tiles.iter().copied(), catalog.len()))
            .collect();
        Ok(CompiledModels { catalog, presets })
    }
}

/// Compile a single example into a catalog
///
/// # Errors
///
/// Propagates catalog validation errors
pub fn compile_example(example: &ExampleGrid) -> Result<TileCatalog> {
    let mut compiler = ModelCompiler::new();
    compiler.add_example(example);
    compiler.finish().map(|compiled| compiled.catalog)
}

/// Compile several examples into one catalog with a preset per example
///
/// # Errors
///
/// Returns `EmptyCatalog` for an empty slice, or propagates catalog
/// validation errors
pub fn merge(examples: &[ExampleGrid]) -> Result<CompiledModels> {
    let mut compiler = ModelCompiler::new();
    for example in examples {
        compiler.add_example(example);
    }
    compiler.finish()
}
