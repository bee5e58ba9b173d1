use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use bhroute_cli::output::OutputFormat;
use bhroute_lib::{Optimization, Platform, SearchTuning};

mod commands;

#[derive(Parser, Debug)]
#[command(author, version, about = "Black hole route planner")]
struct Cli {
    /// Hop data CSV file. Defaults to $BHROUTE_HOPS, then the platform data directory.
    #[arg(long, global = true)]
    hops: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Only use hops recorded on this platform (PS4, PC or XBOX).
    #[arg(long, global = true)]
    platform: Option<Platform>,

    /// Only use hops recorded in this galaxy.
    #[arg(long, global = true)]
    galaxy: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan routes between systems, riding black holes where it pays off.
    Route(RouteArgs),
    /// Check hop data for duplicate black holes and misspelled regions.
    Validate,
    /// Print per-hop distance statistics as CSV.
    Stats,
    /// Describe a coordinate address.
    Coords(CoordsArgs),
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub hops: Option<PathBuf>,
    pub format: OutputFormat,
    pub platform: Option<Platform>,
    pub galaxy: Option<String>,
}

/// Arguments for the route command.
#[derive(Args, Debug, Clone)]
pub struct RouteArgs {
    /// Starting system name or coordinates. Repeat for several origins.
    #[arg(long = "from", required = true)]
    pub from: Vec<String>,

    /// Destination system name or coordinates. Repeat for several destinations.
    #[arg(long = "to", required = true)]
    pub to: Vec<String>,

    /// What the route should minimise.
    #[arg(long, default_value_t = Optimization::Time)]
    pub optimize: Optimization,

    /// Hyperdrive range in light-years.
    #[arg(long, default_value_t = 2000.0)]
    pub max_jump_range: f64,

    /// Stop widening the black hole search once this many candidates are found.
    #[arg(long)]
    pub min_candidates: Option<usize>,

    /// Maximum black holes linked from each exit.
    #[arg(long)]
    pub max_candidates: Option<usize>,
}

impl RouteArgs {
    /// Spatial search tuning with any command-line overrides applied.
    pub fn tuning(&self) -> SearchTuning {
        let defaults = SearchTuning::default();
        SearchTuning {
            min_candidates: self.min_candidates.unwrap_or(defaults.min_candidates),
            max_candidates: self.max_candidates.unwrap_or(defaults.max_candidates),
            ..defaults
        }
    }
}

/// Arguments for the coords command.
#[derive(Args, Debug, Clone)]
pub struct CoordsArgs {
    /// Coordinates such as `07FF:007F:07FE:0079`.
    pub coords: String,

    /// Planet index used for the portal code (0-F).
    #[arg(long, default_value_t = 0)]
    pub planet: u8,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let context = CommandContext {
        hops: cli.hops,
        format: cli.format,
        platform: cli.platform,
        galaxy: cli.galaxy,
    };

    match cli.command {
        Command::Route(args) => commands::route::handle_route(&context, &args),
        Command::Validate => commands::validate::handle_validate(&context),
        Command::Stats => commands::stats::handle_stats(&context),
        Command::Coords(args) => commands::coords::handle_coords(&context, &args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
