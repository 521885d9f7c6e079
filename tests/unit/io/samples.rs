//! Tests for the built-in district examples

#[cfg(test)]
mod tests {
    use wavegrid::io::samples::{self, District, LEGEND};
    use wavegrid::spatial::tiles::Direction;

    // Tests every district parses into a rectangular example
    // Verified by dropping a character from one row
    #[test]
    fn test_districts_parse() {
        for district in District::ALL {
            let example = district.example().unwrap();
            let rows = district.rows();
            assert_eq!(example.height(), rows.len(), "{district:?}");
            assert!(rows.iter().all(|row| row.chars().count() == example.width()));
        }
    }

    // Tests district catalogs are symmetric and weighted by occurrence
    // Verified by registering observed neighbours in one direction only
    #[test]
    fn test_district_catalogs() {
        for district in District::ALL {
            let catalog = district.catalog().unwrap();
            assert!(catalog.verify_symmetry().is_ok(), "{district:?}");

            let cells: usize = district.rows().iter().map(|row| row.chars().count()).sum();
            let total: u64 = catalog.ids().map(|id| u64::from(catalog.weight_of(id))).sum();
            assert_eq!(total, cells as u64, "{district:?}");
        }

        let park = District::Park.catalog().unwrap();
        let water = park.find("water").unwrap();
        let tree = park.find("tree").unwrap();
        assert!(park.is_allowed(water, water, Direction::East));
        assert!(!park.is_allowed(water, tree, Direction::East));
        assert!(park.find("office").is_none());
    }

    // Tests yards may border every residential tile in every direction
    // Verified by removing the yard ring from the top rows
    #[test]
    fn test_residential_yards_border_everything() {
        let residential = District::Residential.catalog().unwrap();
        let yard = residential.find("yard").unwrap();

        for tile in residential.ids() {
            for direction in Direction::ALL {
                assert!(
                    residential.is_compatible(yard, tile, direction),
                    "yard cannot sit {direction} of {}",
                    residential.name_of(tile)
                );
            }
        }
    }

    // Tests the merged city shares tile names and keeps one preset per district
    // Verified by building presets from the merged tile set
    #[test]
    fn test_city_presets() {
        let city = samples::city().unwrap();
        assert_eq!(city.presets.len(), 3);
        assert_eq!(city.catalog.len(), LEGEND.len());

        let road = city.catalog.find("road").unwrap();
        let office = city.catalog.find("office").unwrap();
        let tree = city.catalog.find("tree").unwrap();
        let park = city.presets.first().unwrap();
        let business = city.presets.get(1).unwrap();
        let residential = city.presets.get(2).unwrap();
        assert!(business.contains(office) && !park.contains(office));
        assert!(park.contains(tree) && !residential.contains(tree));
        assert!(business.contains(road) && residential.contains(road));
        assert!(city.presets.iter().all(|preset| preset.capacity() == city.catalog.len()));
    }

    // Tests grass may border every city tile and belongs to every district
    // Verified by dropping the lawn rows from the business example
    #[test]
    fn test_grass_borders_everything() {
        let city = samples::city().unwrap();
        let grass = city.catalog.find("grass").unwrap();

        assert!(city.presets.iter().all(|preset| preset.contains(grass)));
        for tile in city.catalog.ids() {
            for direction in Direction::ALL {
                assert!(
                    city.catalog.is_compatible(grass, tile, direction),
                    "grass cannot sit {direction} of {}",
                    city.catalog.name_of(tile)
                );
            }
        }
    }

    // Tests glyph lookup falls back for unknown names
    // Verified by returning the first legend glyph on a miss
    #[test]
    fn test_glyph_of() {
        assert_eq!(samples::glyph_of("water"), '~');
        assert_eq!(samples::glyph_of("house"), 'h');
        assert_eq!(samples::glyph_of("lava"), '?');
    }
}
