use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rastelev_cli::commands;
use tracing_subscriber::EnvFilter;

/// Inspect rasters and work with raster elevation properties
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show bands, pixel types and statistics of a TIFF raster, and whether it looks like a DEM
    Inspect {
        /// Path to the raster (.tif)
        raster: PathBuf,

        /// Layer name to use instead of the file stem
        #[arg(short, long)]
        name: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Convert a raw pixel value to an elevation using a properties file
    Elevation {
        /// Properties file (.yaml, .yml or .xml)
        properties: PathBuf,

        /// Band the value was read from
        #[arg(short, long, default_value_t = 1)]
        band: usize,

        /// Raw pixel value
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },

    /// Compute the elevation range of a raster under a properties file
    Zrange {
        /// Path to the raster (.tif)
        raster: PathBuf,

        /// Properties file (.yaml, .yml or .xml)
        properties: PathBuf,
    },

    /// Convert a properties file between YAML and XML
    Convert {
        /// Input properties file
        input: PathBuf,

        /// Output properties file; the extension selects the format
        output: PathBuf,
    },
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> rastelev_cli::Result<()> {
    match cli.command {
        Commands::Inspect { raster, name, json } => {
            println!("{}", commands::inspect(&raster, name.as_deref(), json)?);
        }
        Commands::Elevation {
            properties,
            band,
            value,
        } => {
            println!("{}", commands::elevation(&properties, band, value)?);
        }
        Commands::Zrange { raster, properties } => {
            let range = commands::zrange(&raster, &properties)?;
            println!("{}", commands::format_zrange(&range));
        }
        Commands::Convert { input, output } => {
            commands::convert(&input, &output)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
