#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that turns terrain map files into seam overlays.

mod output;
mod terrain_map;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tileseam_catalog::VariantCatalog;
use tileseam_core::LayerName;
use tileseam_system_overlay::{OverlayConfig, OverlayGenerator, OverlayStats};
use tracing::info;
use tracing_subscriber::EnvFilter;

use terrain_map::{Terrain, TerrainMix};

#[derive(Debug, Parser)]
#[command(name = "tileseam", about = "Seam overlay autotiling for terrain grids")]
struct Cli {
    /// Raises log verbosity; ignored when RUST_LOG is set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generates the overlay for a terrain map file.
    Generate(GenerateArgs),
    /// Prints a random terrain map.
    Random(RandomArgs),
}

#[derive(Debug, clap::Args)]
struct GenerateArgs {
    /// Terrain map file, one row per line.
    #[arg(long)]
    map: PathBuf,
    /// Variant catalog manifest; every variant gets a single sprite when omitted.
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Seed for sprite variant picks.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Leaves open corner markers in place.
    #[arg(long)]
    no_corners: bool,
    /// Writes the wall foreground overlay instead of the floor overlay.
    #[arg(long)]
    foreground: bool,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Keys)]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One overlay row per line, tile keys separated by spaces.
    Keys,
    /// Tile counts per layer.
    Stats,
}

#[derive(Debug, clap::Args)]
struct RandomArgs {
    /// Number of columns.
    #[arg(long)]
    width: u32,
    /// Number of rows.
    #[arg(long)]
    height: u32,
    /// Percentage of wall cells.
    #[arg(long, default_value_t = 35.0)]
    wall: f64,
    /// Percentage of hole cells.
    #[arg(long, default_value_t = 10.0)]
    hole: f64,
    /// Percentage of void cells.
    #[arg(long, default_value_t = 5.0)]
    void: f64,
    /// Seed for the terrain draws.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Entry point for the tileseam command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Command::Generate(args) => generate(&args, &mut out),
        Command::Random(args) => random(&args, &mut out),
    }
}

fn init_tracing(verbose: u8) {
    let level = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();
}

fn generate(args: &GenerateArgs, out: &mut impl Write) -> Result<()> {
    let contents = fs::read_to_string(&args.map)
        .with_context(|| format!("failed to read terrain map at {}", args.map.display()))?;
    let grid = terrain_map::parse(&contents)
        .with_context(|| format!("invalid terrain map {}", args.map.display()))?;
    let selectors =
        terrain_map::standard_selectors().context("failed to register terrain selectors")?;

    let generator = OverlayGenerator::new(OverlayConfig {
        resolve_corners: !args.no_corners,
        ..OverlayConfig::default()
    });
    let catalog = match &args.catalog {
        Some(path) => VariantCatalog::from_manifest_path(path)
            .with_context(|| format!("failed to load catalog {}", path.display()))?,
        None => VariantCatalog::single_row(generator.variant_names()),
    };
    info!(
        width = grid.width(),
        height = grid.height(),
        variants = catalog.len(),
        seed = args.seed,
        "generating_overlay"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let overlay = if args.foreground {
        let layer = LayerName::new("wall").context("invalid foreground layer")?;
        generator.generate_foreground(
            &grid,
            &layer,
            |cell| *cell == Terrain::Wall,
            &catalog,
            &mut rng,
        )
    } else {
        generator.generate(&grid, &selectors, &catalog, &mut rng)
    };
    let written = match args.format {
        OutputFormat::Keys => output::write_keys(&overlay, out),
        OutputFormat::Stats => writeln!(out, "{}", OverlayStats::collect(&overlay)),
    };
    written.context("failed to write overlay")
}

fn random(args: &RandomArgs, out: &mut impl Write) -> Result<()> {
    let mix = terrain_mix(args)?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let grid = terrain_map::random(args.width, args.height, mix, &mut rng)
        .context("invalid map dimensions")?;
    out.write_all(terrain_map::render(&grid).as_bytes())
        .context("failed to write terrain map")
}

fn terrain_mix(args: &RandomArgs) -> Result<TerrainMix> {
    let shares = [("wall", args.wall), ("hole", args.hole), ("void", args.void)];
    for (name, percent) in shares {
        if !(0.0..=100.0).contains(&percent) {
            bail!("--{name} must be between 0 and 100, got {percent}");
        }
    }
    let total = args.wall + args.hole + args.void;
    if total > 100.0 {
        bail!("wall, hole and void percentages add up to {total}, above 100");
    }
    Ok(TerrainMix {
        wall: args.wall / 100.0,
        hole: args.hole / 100.0,
        void: args.void / 100.0,
    })
}
