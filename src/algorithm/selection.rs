//! Lowest-entropy cell selection

use crate::spatial::grid::Grid;

/// Pick the next cell to collapse
///
/// Scans uncollapsed cells in row-major order and returns the one with
/// strictly lowest entropy, so the first cell found wins ties. An uncollapsed
/// cell at zero entropy is returned immediately. Contradicted cells are never
/// selected. Returns `None` when no open cell remains.
pub fn select_lowest_entropy(grid: &Grid) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;

    for cell in grid.cells() {
        if cell.is_collapsed() || cell.is_contradicted() {
            continue;
        }

        let entropy = cell.entropy();
        if entropy <= 0.0 {
            return Some(cell.position());
        }
        if best.is_none_or(|(_, lowest)| entropy < lowest) {
            best = Some((cell.position(), entropy));
        }
    }

    best.map(|(position, _)| position)
}
