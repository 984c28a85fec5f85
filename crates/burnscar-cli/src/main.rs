mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "burnscar", about = "Annual burned area mapping from burn probability stacks")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show ENVI raster metadata
    Info(commands::info::InfoArgs),
    /// Threshold burn probabilities into burn scar classifications
    Threshold(commands::threshold::ThresholdArgs),
    /// Aggregate burn classifications into annual products
    Annual(commands::annual::AnnualArgs),
    /// Build seasonal summaries and annual maxima of spectral indices
    Composite(commands::composite::CompositeArgs),
    /// Run thresholding and annual aggregation in sequence
    Run(commands::pipeline::RunArgs),
    /// Print or save a default pipeline config
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Threshold(args) => commands::threshold::run(args),
        Commands::Annual(args) => commands::annual::run(args),
        Commands::Composite(args) => commands::composite::run(args),
        Commands::Run(args) => commands::pipeline::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
