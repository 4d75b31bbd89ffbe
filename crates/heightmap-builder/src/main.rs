//! Build a 16-bit British National Grid heightmap from Copernicus DEM tiles.

use clap::Parser;
use heightmap_builder::{run, BuildConfig, BuildError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Heightmap builder
#[derive(Parser, Debug)]
#[command(name = "build-heightmap")]
#[command(about = "Resample WGS84 DEM tiles onto a 16-bit British National Grid heightmap")]
struct Args {
    /// YAML configuration file. Built-in London defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the source tiles (overrides the config file).
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Directory to write the heightmap and metadata to (overrides the config file).
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Log level, used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("=== National Grid Heightmap Generator ===");

    match load_config(&args).and_then(|config| run(&config)) {
        Ok(report) => {
            info!(
                "Done: {}x{} heightmap, elevation {:.2} - {:.2}m",
                report.width, report.height, report.metadata.elev_min_m, report.metadata.elev_max_m
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Read the config file (if any) and apply command-line overrides.
fn load_config(args: &Args) -> Result<BuildConfig, BuildError> {
    let mut config = match &args.config {
        Some(path) => BuildConfig::from_yaml_file(path)?,
        None => BuildConfig::default(),
    };

    if let Some(dir) = &args.source_dir {
        config.tiles.source_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output.dir = dir.clone();
    }

    Ok(config)
}
