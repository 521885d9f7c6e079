//! CLI entry point for the wave function collapse grid generator

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wavegrid::io::cli::{Cli, GridGenerator};

fn main() -> wavegrid::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let generator = GridGenerator::new(cli);
    generator.generate()
}
