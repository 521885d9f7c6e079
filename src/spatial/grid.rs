//! Fixed-size 2D grid of cells with von Neumann neighbour lookup
//!
//! Cells are stored in an `Array2` indexed `[row, col]`, i.e. `[y, x]`, so
//! iterating the array visits cells in row-major order. A grid is built
//! fresh for every solve attempt and never changes shape.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::catalog::TileCatalog;
use crate::spatial::cell::Cell;
use crate::spatial::tiles::{Direction, TileId};

/// Grid of cells owned by one solve attempt
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
}

impl Grid {
    /// Create a grid whose cells all start with every catalog tile
    pub fn new(width: usize, height: usize, catalog: &TileCatalog) -> Self {
        let all = catalog.all_tiles();
        Self::with_candidates(width, height, catalog, |_, _| all.clone())
    }

    /// Create a grid with per-cell initial candidates
    ///
    /// `candidates` is called with `(x, y)` for every cell.
    pub fn with_candidates<F>(width: usize, height: usize, catalog: &TileCatalog, mut candidates: F) -> Self
    where
        F: FnMut(usize, usize) -> TileBitset,
    {
        let cells = Array2::from_shape_fn((height, width), |(y, x)| {
            Cell::new(x, y, candidates(x, y), catalog)
        });
        Self { cells }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Cell at `(x, y)`
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        self.cells.get([y, x])
    }

    /// Mutable cell at `(x, y)`
    pub fn cell_mut(&mut self, x: usize, y: usize) -> Option<&mut Cell> {
        self.cells.get_mut([y, x])
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// In-bounds neighbour coordinates paired with their direction from `(x, y)`
    ///
    /// Corners yield two entries, edges three, interior cells four.
    pub fn neighbour_positions(
        &self,
        x: usize,
        y: usize,
    ) -> impl Iterator<Item = ((usize, usize), Direction)> + use<> {
        let (width, height) = (self.width(), self.height());
        let inside = x < width && y < height;
        Direction::ALL.into_iter().filter_map(move |direction| {
            if !inside {
                return None;
            }
            direction
                .step(x, y, width, height)
                .map(|position| (position, direction))
        })
    }

    /// Neighbouring cells of `(x, y)` paired 1:1 with their directions
    pub fn get_neighbours(&self, x: usize, y: usize) -> (Vec<&Cell>, Vec<Direction>) {
        self.neighbour_positions(x, y)
            .filter_map(|((nx, ny), direction)| self.cell(nx, ny).map(|cell| (cell, direction)))
            .unzip()
    }

    /// Committed neighbour tiles of `(x, y)` with their directions
    pub fn committed_neighbours(&self, x: usize, y: usize) -> Vec<(TileId, Direction)> {
        self.neighbour_positions(x, y)
            .filter_map(|((nx, ny), direction)| {
                self.cell(nx, ny)
                    .and_then(Cell::committed)
                    .map(|tile| (tile, direction))
            })
            .collect()
    }

    /// Constrain the cell at `(x, y)` against its committed neighbours
    ///
    /// Returns `true` if any candidate was removed. Out-of-bounds positions
    /// and collapsed cells never change.
    pub fn apply_constraints_at(&mut self, x: usize, y: usize, catalog: &TileCatalog) -> bool {
        let neighbours = self.committed_neighbours(x, y);
        self.cell_mut(x, y)
            .is_some_and(|cell| cell.apply_constraints(neighbours, catalog))
    }

    /// No uncollapsed cell has run out of candidates
    pub fn is_satisfiable(&self) -> bool {
        !self.cells.iter().any(Cell::is_contradicted)
    }

    /// First contradicted cell in row-major order
    pub fn first_contradiction(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .find(|cell| cell.is_contradicted())
            .map(Cell::position)
    }

    /// Every cell has a committed tile
    pub fn is_fully_collapsed(&self) -> bool {
        self.cells.iter().all(Cell::is_collapsed)
    }

    /// Number of committed cells
    pub fn collapsed_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_collapsed()).count()
    }

    /// Committed tile per cell, `None` where still open
    pub fn committed_tiles(&self) -> Array2<Option<TileId>> {
        self.cells.map(Cell::committed)
    }
}
