//! Tests for command-line parsing and grid rendering

#[cfg(test)]
mod tests {
    use clap::Parser;
    use wavegrid::algorithm::executor::{SolverConfig, WaveFunction};
    use wavegrid::algorithm::propagation::PropagationStrategy;
    use wavegrid::io::cli::{Cli, Generator, Preset, render};
    use wavegrid::io::configuration::{DEFAULT_ITERATION_LIMIT, DEFAULT_SEED, DEFAULT_WIDTH};
    use wavegrid::spatial::catalog::TileCatalog;

    // Tests defaults apply when no flags are given
    // Verified by changing the seed default
    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["wavegrid"]);
        assert_eq!(cli.width, DEFAULT_WIDTH);
        assert_eq!(cli.seed, DEFAULT_SEED);
        assert_eq!(cli.iterations, DEFAULT_ITERATION_LIMIT);
        assert_eq!(cli.preset, Preset::City);
        assert_eq!(cli.generator, Generator::Mt);
        assert!(cli.should_show_progress());
        assert_eq!(cli.strategy(), PropagationStrategy::Incremental);
    }

    // Tests short flags, negative seeds and value enums
    // Verified by disallowing negative numbers for the seed
    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "wavegrid", "-w", "8", "-H", "5", "-s", "-17", "-i", "3", "-b", "-p", "park", "-g",
            "xorshift", "-q",
        ]);
        assert_eq!((cli.width, cli.height), (8, 5));
        assert_eq!(cli.seed, -17);
        assert_eq!(cli.iterations, 3);
        assert_eq!(cli.preset, Preset::Park);
        assert_eq!(cli.generator, Generator::Xorshift);
        assert!(!cli.should_show_progress());
        assert_eq!(cli.strategy(), PropagationStrategy::Exhaustive);
    }

    // Tests the city preset brings three presets and single districts none
    // Verified by returning the city presets for every preset
    #[test]
    fn test_model_and_config() {
        let city = Cli::parse_from(["wavegrid"]);
        let (catalog, presets) = city.model().unwrap();
        assert_eq!(presets.len(), 3);
        let config = city.config(presets);
        assert!(config.validate(&catalog).is_ok());
        assert_eq!(config.seed, DEFAULT_SEED);

        let park = Cli::parse_from(["wavegrid", "--preset", "park"]);
        let (catalog, presets) = park.model().unwrap();
        assert!(presets.is_empty());
        assert!(catalog.find("tree").is_some());
        assert!(catalog.find("office").is_none());
    }

    // Tests every preset solves at the default size, seed and retry budget
    // Verified by restoring a residential example without a universal neighbour
    #[test]
    fn test_every_preset_solves_at_defaults() {
        for preset in ["city", "park", "business", "residential"] {
            let cli = Cli::parse_from(["wavegrid", "--preset", preset]);
            let (catalog, presets) = cli.model().unwrap();
            let config = cli.config(presets);
            let mut solver = WaveFunction::new(catalog, config).unwrap();

            let solved = solver.run(cli.seed);
            assert!(solved.is_ok(), "{preset}: {solved:?}");
            let solved = solved.unwrap();
            assert_eq!((solved.width(), solved.height()), (cli.width, cli.height));
        }
    }

    // Tests rendering prints one glyph per cell and one line per row
    // Verified by rendering columns as lines
    #[test]
    fn test_render() {
        let mut builder = TileCatalog::builder();
        let grass = builder.tile("grass", 1);
        let water = builder.tile("water", 1);
        builder
            .allow_everywhere(grass, grass)
            .allow_everywhere(grass, water)
            .allow_everywhere(water, water);
        let catalog = builder.build().unwrap();

        let mut solver = WaveFunction::new(catalog, SolverConfig::new(3, 2)).unwrap();
        let solved = solver.run(4).unwrap();
        let output = render(&solved, solver.catalog());

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        for (y, line) in lines.iter().enumerate() {
            assert_eq!(line.chars().count(), 3);
            for (x, glyph) in line.chars().enumerate() {
                let tile = solved.tile(x, y).unwrap();
                let expected = if tile == grass { 'g' } else { '~' };
                assert_eq!(glyph, expected);
            }
        }
    }
}
