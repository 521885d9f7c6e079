//! Tests for catalog construction, adjacency queries and symmetry checking

#[cfg(test)]
mod tests {
    use wavegrid::SolverError;
    use wavegrid::algorithm::bitset::TileBitset;
    use wavegrid::spatial::catalog::TileCatalog;
    use wavegrid::spatial::tiles::{AdjacencyRule, Direction, Tile, TileId};

    // Tests empty input is rejected
    // Verified by removing the emptiness check
    #[test]
    fn test_empty_catalog() {
        assert_eq!(TileCatalog::new(Vec::new()).unwrap_err(), SolverError::EmptyCatalog);
    }

    // Tests rules pointing past the catalog are rejected
    // Verified by silently skipping out-of-range rules
    #[test]
    fn test_rule_index_out_of_range() {
        let tiles = vec![Tile::new("a", 1).with_rule(AdjacencyRule::new(TileId(4), Direction::North))];
        assert_eq!(
            TileCatalog::new(tiles).unwrap_err(),
            SolverError::InvalidTileIndex {
                index: 4,
                max_tiles: 1
            }
        );
    }

    // Tests duplicate tile names are rejected
    // Verified by letting later names overwrite earlier ones
    #[test]
    fn test_duplicate_names() {
        let tiles = vec![Tile::new("a", 1), Tile::new("a", 2)];
        assert!(matches!(
            TileCatalog::new(tiles),
            Err(SolverError::InvalidParameter { .. })
        ));
    }

    // Tests is_allowed is one-way while is_compatible needs both sides
    // Verified by making is_compatible return is_allowed alone
    #[test]
    fn test_allowed_versus_compatible() {
        let mut builder = TileCatalog::builder();
        let a = builder.tile("a", 1);
        let b = builder.tile("b", 1);
        builder.allow(a, b, Direction::East);
        let catalog = builder.build().unwrap();

        assert!(catalog.is_allowed(a, b, Direction::East));
        assert!(!catalog.is_allowed(b, a, Direction::West));
        assert!(!catalog.is_compatible(a, b, Direction::East));
    }

    // Tests verify_symmetry names the first rule missing its mirror
    // Verified by checking the mirror in the same direction instead of the opposite
    #[test]
    fn test_verify_symmetry() {
        let mut builder = TileCatalog::builder();
        let road = builder.tile("road", 1);
        let park = builder.tile("park", 1);
        builder
            .allow_symmetric(road, road, Direction::North)
            .allow(road, park, Direction::East);
        let catalog = builder.build().unwrap();

        assert_eq!(
            catalog.verify_symmetry(),
            Err(SolverError::AsymmetricAdjacency {
                tile: "road".to_string(),
                other: "park".to_string(),
                direction: Direction::East,
            })
        );

        let mut symmetric = TileCatalog::builder();
        let x = symmetric.tile("x", 1);
        let y = symmetric.tile("y", 1);
        symmetric.allow_symmetric(x, y, Direction::South);
        assert!(symmetric.build().unwrap().verify_symmetry().is_ok());
    }

    // Tests the builder merges repeated names by summing frequencies
    // Verified by pushing a second tile for a repeated name
    #[test]
    fn test_builder_accumulates_frequency() {
        let mut builder = TileCatalog::builder();
        let first = builder.tile("grass", 2);
        let again = builder.tile("grass", 5);
        assert_eq!(first, again);

        let catalog = builder.build().unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.weight_of(first), 7);
        assert_eq!(catalog.name_of(first), "grass");
    }

    // Tests weight sums over subsets, with zero for the empty set
    // Verified by summing over all tiles regardless of the subset
    #[test]
    fn test_sum_of_weights() {
        let mut builder = TileCatalog::builder();
        let a = builder.tile("a", 3);
        let b = builder.tile("b", 1);
        let c = builder.tile("c", 6);
        let catalog = builder.build().unwrap();

        assert_eq!(catalog.sum_of_weights(&catalog.all_tiles()), 10);
        assert_eq!(catalog.sum_of_weights(&TileBitset::from_tiles([a, c], 3)), 9);
        assert_eq!(catalog.sum_of_weights(&TileBitset::new(3)), 0);
        assert_eq!(catalog.weight_of(b), 1);
        assert_eq!(catalog.weight_of(TileId(9)), 0);
    }

    // Tests name subsets resolve to ids and unknown names fail
    // Verified by ignoring unknown names
    #[test]
    fn test_subset_by_name() {
        let mut builder = TileCatalog::builder();
        builder.tile("a", 1);
        let b = builder.tile("b", 1);
        let catalog = builder.build().unwrap();

        let subset = catalog.subset(["b"]).unwrap();
        assert_eq!(subset.to_vec(), vec![b]);
        assert!(catalog.subset(["b", "z"]).is_err());
        assert_eq!(catalog.find("z"), None);
    }

    // Tests allowed_neighbours exposes the precomputed per-direction table
    // Verified by storing rules under the opposite direction
    #[test]
    fn test_allowed_neighbours_table() {
        let mut builder = TileCatalog::builder();
        let a = builder.tile("a", 1);
        let b = builder.tile("b", 1);
        builder.allow_everywhere(a, b);
        let catalog = builder.build().unwrap();

        let north = catalog.allowed_neighbours(a, Direction::North).unwrap();
        assert_eq!(north.to_vec(), vec![b]);
        assert!(catalog.allowed_neighbours(TileId(5), Direction::North).is_none());
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![a, b]);
    }
}
