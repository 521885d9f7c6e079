//! Command-line interface for generating districts from the built-in samples

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::executor::{SolvedGrid, SolverConfig, WaveFunction};
use crate::algorithm::propagation::PropagationStrategy;
use crate::io::configuration::{DEFAULT_HEIGHT, DEFAULT_ITERATION_LIMIT, DEFAULT_SEED, DEFAULT_WIDTH};
use crate::io::error::Result;
use crate::io::progress::ProgressReporter;
use crate::io::samples::{self, District};
use crate::math::random::GeneratorKind;
use crate::spatial::catalog::TileCatalog;
use clap::{Parser, ValueEnum};

/// Which sample model to generate from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// All districts on one partitioned grid
    #[default]
    City,
    /// Park tiles only
    Park,
    /// Business tiles only
    Business,
    /// Residential tiles only
    Residential,
}

/// Pseudo-random generator family
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Generator {
    /// Mersenne Twister
    #[default]
    Mt,
    /// Marsaglia xor128
    Xorshift,
    /// Linear congruential
    Lcg,
}

impl From<Generator> for GeneratorKind {
    fn from(generator: Generator) -> Self {
        match generator {
            Generator::Mt => Self::MersenneTwister,
            Generator::Xorshift => Self::XorShift,
            Generator::Lcg => Self::Lcg,
        }
    }
}

#[derive(Parser)]
#[command(name = "wavegrid")]
#[command(
    author,
    version,
    about = "Generate tile grids by wave function collapse"
)]
/// Command-line arguments for the grid generator
pub struct Cli {
    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Seed of the first attempt
    #[arg(short, long, default_value_t = DEFAULT_SEED, allow_negative_numbers = true)]
    pub seed: i32,

    /// Restarts allowed after contradictions
    #[arg(short, long, default_value_t = DEFAULT_ITERATION_LIMIT)]
    pub iterations: usize,

    /// Use exhaustive sweeps instead of incremental propagation
    #[arg(short, long)]
    pub brute_force: bool,

    /// Sample model to generate from
    #[arg(short, long, value_enum, default_value_t = Preset::City)]
    pub preset: Preset,

    /// Pseudo-random generator
    #[arg(short, long, value_enum, default_value_t = Generator::Mt)]
    pub generator: Generator,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Propagation strategy selected by the flags
    pub const fn strategy(&self) -> PropagationStrategy {
        if self.brute_force {
            PropagationStrategy::Exhaustive
        } else {
            PropagationStrategy::Incremental
        }
    }

    /// Catalog and presets for the selected sample
    ///
    /// # Errors
    ///
    /// Returns an error if the built-in samples fail to compile
    pub fn model(&self) -> Result<(TileCatalog, Vec<TileBitset>)> {
        let district = match self.preset {
            Preset::City => {
                let compiled = samples::city()?;
                return Ok((compiled.catalog, compiled.presets));
            }
            Preset::Park => District::Park,
            Preset::Business => District::Business,
            Preset::Residential => District::Residential,
        };
        Ok((district.catalog()?, Vec::new()))
    }

    /// Solver configuration for these arguments
    pub fn config(&self, presets: Vec<TileBitset>) -> SolverConfig {
        SolverConfig::new(self.width, self.height)
            .with_seed(self.seed)
            .with_iteration_limit(self.iterations)
            .with_strategy(self.strategy())
            .with_presets(presets)
    }
}

/// Runs one generation from parsed arguments
pub struct GridGenerator {
    cli: Cli,
}

impl GridGenerator {
    /// Create a generator with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Solve and print the grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The arguments produce an invalid configuration
    /// - No solution is found within the retry budget
    // Allow print: the generated grid is the program's output
    #[allow(clippy::print_stdout)]
    pub fn generate(&self) -> Result<()> {
        let (catalog, presets) = self.cli.model()?;
        let config = self.cli.config(presets);
        let rng = GeneratorKind::from(self.cli.generator).build(config.seed);
        let mut solver = WaveFunction::with_generator(catalog, config, rng)?;
        solver.set_event_queue(false);

        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressReporter::new(self.cli.width.saturating_mul(self.cli.height)));
        if let Some(ref reporter) = progress {
            solver.subscribe(reporter.observer());
        }

        let outcome = solver.run(self.cli.seed);
        if let Some(ref reporter) = progress {
            reporter.finish();
        }
        let solved = outcome?;

        print!("{}", render(&solved, solver.catalog()));
        Ok(())
    }
}

/// One line per row, one glyph per cell
pub fn render(solved: &SolvedGrid, catalog: &TileCatalog) -> String {
    let mut output = String::with_capacity((solved.width() + 1) * solved.height());
    for row in solved.tiles().rows() {
        output.extend(row.iter().map(|&tile| samples::glyph_of(catalog.name_of(tile))));
        output.push('\n');
    }
    output
}
