//! Tests for exhaustive and incremental constraint propagation

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use wavegrid::algorithm::bitset::TileBitset;
    use wavegrid::algorithm::propagation::{
        Constrained, PropagationStrategy, propagate, propagate_exhaustive, propagate_incremental,
    };
    use wavegrid::math::random::MersenneTwister;
    use wavegrid::spatial::catalog::TileCatalog;
    use wavegrid::spatial::grid::Grid;
    use wavegrid::spatial::tiles::{Direction, TileId};

    /// A and B must alternate horizontally; anything may stack vertically
    fn alternating_catalog() -> TileCatalog {
        let mut builder = TileCatalog::builder();
        let a = builder.tile("a", 1);
        let b = builder.tile("b", 1);
        builder
            .allow_symmetric(a, b, Direction::East)
            .allow_symmetric(b, a, Direction::East);
        for (x, y) in [(a, a), (a, b), (b, b)] {
            builder
                .allow_symmetric(x, y, Direction::South)
                .allow_symmetric(x, y, Direction::North);
        }
        builder.build().unwrap()
    }

    fn grid_with_committed(
        width: usize,
        height: usize,
        catalog: &TileCatalog,
        at: (usize, usize),
        tile: TileId,
    ) -> Grid {
        let mut grid = Grid::with_candidates(width, height, catalog, |x, y| {
            if (x, y) == at {
                TileBitset::singleton(catalog.len(), tile)
            } else {
                catalog.all_tiles()
            }
        });
        let mut rng = MersenneTwister::new(1);
        grid.cell_mut(at.0, at.1)
            .unwrap()
            .collapse(catalog, &mut rng)
            .unwrap();
        grid
    }

    fn candidate_sets(grid: &Grid) -> Vec<TileBitset> {
        grid.cells().map(|cell| cell.candidates().clone()).collect()
    }

    // Tests only neighbours of the committed cell lose candidates
    // Verified by constraining against uncollapsed neighbours' candidate sets
    #[test]
    fn test_incremental_constrains_direct_neighbours() {
        let catalog = alternating_catalog();
        let mut grid = grid_with_committed(3, 1, &catalog, (0, 0), TileId(0));

        let outcome = propagate_incremental(&mut grid, &catalog, (0, 0));

        assert_eq!(
            outcome.constrained,
            vec![Constrained {
                x: 1,
                y: 0,
                remaining: 1
            }]
        );
        assert_eq!(grid.cell(1, 0).unwrap().candidates().only(), Some(TileId(1)));
        assert_eq!(grid.cell(2, 0).unwrap().candidates().count(), 2);
    }

    // Tests the exhaustive sweep restarts after each change and ends on a clean pass
    // Verified by continuing the sweep instead of restarting from the top
    #[test]
    fn test_exhaustive_pass_count() {
        let catalog = alternating_catalog();
        let mut grid = grid_with_committed(3, 3, &catalog, (1, 1), TileId(0));

        let outcome = propagate_exhaustive(&mut grid, &catalog);

        // West and east neighbours narrow to B; north and south keep both
        assert_eq!(outcome.constrained.len(), 2);
        assert_eq!(outcome.passes, outcome.constrained.len() + 1);
        assert_eq!(grid.cell(0, 1).unwrap().candidates().only(), Some(TileId(1)));
        assert_eq!(grid.cell(2, 1).unwrap().candidates().only(), Some(TileId(1)));
        assert_eq!(grid.cell(1, 0).unwrap().candidates().count(), 2);
    }

    // Tests committed cells stay committed even beside an incompatible commitment
    // Verified by removing the collapsed-cell guards in the sweep and in Cell::apply_constraints
    #[test]
    fn test_committed_cells_untouched() {
        let catalog = alternating_catalog();
        let mut grid = grid_with_committed(2, 1, &catalog, (0, 0), TileId(0));
        let mut rng = MersenneTwister::new(1);
        let neighbour = grid.cell_mut(1, 0).unwrap();
        *neighbour = wavegrid::spatial::cell::Cell::new(
            1,
            0,
            TileBitset::singleton(2, TileId(0)),
            &catalog,
        );
        neighbour.collapse(&catalog, &mut rng).unwrap();

        let outcome = propagate(&mut grid, &catalog, PropagationStrategy::Exhaustive, (1, 0));

        assert!(outcome.constrained.is_empty());
        for x in 0..2 {
            let cell = grid.cell(x, 0).unwrap();
            assert_eq!(cell.committed(), Some(TileId(0)));
            assert_eq!(cell.candidates().only(), Some(TileId(0)));
        }
    }

    // Tests both strategies agree after every collapse of randomly driven solves
    // Verified by skipping the push of neighbours in the incremental cascade
    #[test]
    fn test_strategies_reach_same_fixed_point() {
        let mut random = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let tiles = random.random_range(2..6);
            let mut builder = TileCatalog::builder();
            let ids: Vec<TileId> = (0..tiles)
                .map(|index| builder.tile(&format!("t{index}"), random.random_range(1..5)))
                .collect();
            for &a in &ids {
                for &b in &ids {
                    for direction in Direction::ALL {
                        if random.random_bool(0.5) {
                            builder.allow_symmetric(a, b, direction);
                        }
                    }
                }
            }
            let catalog = builder.build().unwrap();

            let mut exhaustive = Grid::new(5, 4, &catalog);
            let mut rng = MersenneTwister::new(random.random());

            for _ in 0..20 {
                let open: Vec<(usize, usize)> = exhaustive
                    .cells()
                    .filter(|cell| !cell.is_collapsed() && !cell.candidates().is_empty())
                    .map(|cell| cell.position())
                    .collect();
                if open.is_empty() {
                    break;
                }
                let (x, y) = *open.get(random.random_range(0..open.len())).unwrap();
                exhaustive
                    .cell_mut(x, y)
                    .unwrap()
                    .collapse(&catalog, &mut rng)
                    .unwrap();

                let mut incremental = exhaustive.clone();
                propagate_exhaustive(&mut exhaustive, &catalog);
                propagate_incremental(&mut incremental, &catalog, (x, y));

                assert_eq!(candidate_sets(&exhaustive), candidate_sets(&incremental));
                if !exhaustive.is_satisfiable() {
                    break;
                }
            }
        }
    }
}
