//! Constraint propagation after a collapse
//!
//! Two interchangeable algorithms reach the same fixed point. The exhaustive
//! sweep is the simple reference; the incremental worklist only revisits
//! cells whose neighbourhood actually changed.

use ndarray::Array2;

use crate::spatial::catalog::TileCatalog;
use crate::spatial::cell::Cell;
use crate::spatial::grid::Grid;

/// How constraints are carried across the grid
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PropagationStrategy {
    /// Repeated full row-major sweeps until one produces no change
    Exhaustive,
    /// Stack-driven cascade outward from the last collapsed cell
    #[default]
    Incremental,
}

/// A cell that lost candidates during propagation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Constrained {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Candidates left after the change
    pub remaining: usize,
}

/// Summary of one propagation run
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropagationOutcome {
    /// Cells changed, in the order they changed
    pub constrained: Vec<Constrained>,
    /// Sweeps (exhaustive) or worklist pops (incremental) performed
    pub passes: usize,
}

impl PropagationOutcome {
    fn record(&mut self, grid: &Grid, x: usize, y: usize) {
        let remaining = grid.cell(x, y).map_or(0, |cell| cell.candidates().count());
        self.constrained.push(Constrained { x, y, remaining });
    }
}

/// Propagate with the chosen strategy
///
/// `origin` is the most recently collapsed cell; the exhaustive sweep
/// ignores it.
pub fn propagate(
    grid: &mut Grid,
    catalog: &TileCatalog,
    strategy: PropagationStrategy,
    origin: (usize, usize),
) -> PropagationOutcome {
    match strategy {
        PropagationStrategy::Exhaustive => propagate_exhaustive(grid, catalog),
        PropagationStrategy::Incremental => propagate_incremental(grid, catalog, origin),
    }
}

/// Sweep the whole grid, restarting from the top after every change
pub fn propagate_exhaustive(grid: &mut Grid, catalog: &TileCatalog) -> PropagationOutcome {
    let (width, height) = (grid.width(), grid.height());
    let mut outcome = PropagationOutcome::default();

    'sweep: loop {
        outcome.passes += 1;
        for y in 0..height {
            for x in 0..width {
                if grid.cell(x, y).is_none_or(Cell::is_collapsed) {
                    continue;
                }
                if grid.apply_constraints_at(x, y, catalog) {
                    outcome.record(grid, x, y);
                    continue 'sweep;
                }
            }
        }
        break;
    }

    outcome
}

/// Cascade from the neighbours of `origin` using a worklist
///
/// A cell is processed at most once per call. Only a cell that actually
/// changed pushes its own neighbours.
pub fn propagate_incremental(
    grid: &mut Grid,
    catalog: &TileCatalog,
    origin: (usize, usize),
) -> PropagationOutcome {
    let mut outcome = PropagationOutcome::default();
    let mut processed = Array2::from_elem((grid.height(), grid.width()), false);
    let (ox, oy) = origin;
    let mut stack: Vec<(usize, usize)> = grid
        .neighbour_positions(ox, oy)
        .map(|(position, _)| position)
        .collect();

    while let Some((x, y)) = stack.pop() {
        outcome.passes += 1;
        let open = grid.cell(x, y).is_some_and(|cell| !cell.is_collapsed());
        let seen = processed.get([y, x]).copied().unwrap_or(true);
        if !open || seen {
            continue;
        }

        let changed = grid.apply_constraints_at(x, y, catalog);
        if let Some(mark) = processed.get_mut([y, x]) {
            *mark = true;
        }
        if !changed {
            continue;
        }

        outcome.record(grid, x, y);
        for ((nx, ny), _) in grid.neighbour_positions(x, y) {
            let unmarked = !processed.get([ny, nx]).copied().unwrap_or(true);
            let uncollapsed = grid.cell(nx, ny).is_some_and(|cell| !cell.is_collapsed());
            if unmarked && uncollapsed {
                stack.push((nx, ny));
            }
        }
    }

    outcome
}
