//! Tests for lowest-entropy cell selection and its row-major tie-break

#[cfg(test)]
mod tests {
    use wavegrid::algorithm::bitset::TileBitset;
    use wavegrid::algorithm::selection::select_lowest_entropy;
    use wavegrid::spatial::catalog::TileCatalog;
    use wavegrid::spatial::grid::Grid;
    use wavegrid::spatial::tiles::TileId;

    fn three_tile_catalog() -> TileCatalog {
        let mut builder = TileCatalog::builder();
        let a = builder.tile("a", 1);
        let b = builder.tile("b", 1);
        let c = builder.tile("c", 1);
        builder.allow_everywhere(a, b).allow_everywhere(b, c);
        builder.build().unwrap()
    }

    // Tests equal entropies resolve to the first cell in row-major order
    // Verified by using <= instead of < in the comparison
    #[test]
    fn test_ties_prefer_first_in_row_major_order() {
        let catalog = three_tile_catalog();
        let grid = Grid::new(3, 2, &catalog);
        assert_eq!(select_lowest_entropy(&grid), Some((0, 0)));
    }

    // Tests the strictly lowest entropy wins over earlier cells
    // Verified by returning the first open cell without comparing entropy
    #[test]
    fn test_lowest_entropy_wins() {
        let catalog = three_tile_catalog();
        let grid = Grid::with_candidates(3, 2, &catalog, |x, y| {
            if (x, y) == (1, 1) {
                TileBitset::from_tiles([TileId(0), TileId(1)], 3)
            } else {
                catalog.all_tiles()
            }
        });
        assert_eq!(select_lowest_entropy(&grid), Some((1, 1)));
    }

    // Tests a cell with one candidate left is chosen over wider cells
    // Verified by selecting the highest entropy instead of the lowest
    #[test]
    fn test_single_candidate_selected_immediately() {
        let catalog = three_tile_catalog();
        let grid = Grid::with_candidates(3, 3, &catalog, |x, y| match (x, y) {
            (2, 0) => TileBitset::singleton(3, TileId(2)),
            (0, 2) => TileBitset::singleton(3, TileId(0)),
            _ => catalog.all_tiles(),
        });
        assert_eq!(select_lowest_entropy(&grid), Some((2, 0)));
    }

    // Tests contradicted cells are never selected
    // Verified by dropping the is_contradicted check
    #[test]
    fn test_contradicted_cells_are_skipped() {
        let catalog = three_tile_catalog();
        let grid = Grid::with_candidates(2, 1, &catalog, |x, _| {
            if x == 0 {
                TileBitset::new(3)
            } else {
                catalog.all_tiles()
            }
        });
        assert_eq!(select_lowest_entropy(&grid), Some((1, 0)));
    }

    // Tests a grid with no open cells yields no selection
    // Verified by returning (0, 0) as a default
    #[test]
    fn test_no_open_cells() {
        let catalog = three_tile_catalog();
        let grid = Grid::with_candidates(2, 2, &catalog, |_, _| TileBitset::new(3));
        assert_eq!(select_lowest_entropy(&grid), None);
    }
}
