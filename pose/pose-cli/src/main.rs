//! Keypoint file inspection and labeled export.
//!
//! # Commands
//!
//! - `pose inspect <PATH>` - Load a keypoint file and report its shape
//! - `pose export <KEYPOINTS> --labels <NAMES>` - Write a labeled CSV
//!
//! Log output goes to stderr and follows `RUST_LOG` (default `info`).

mod export;
mod inspect;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Pose keypoint tools
#[derive(Parser, Debug)]
#[command(name = "pose")]
#[command(about = "Inspect keypoint files and export frame labels", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug detail (header and column stripping)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load a .npy or .csv keypoint file and report what was found
    Inspect {
        /// Keypoint file
        #[arg(name = "PATH")]
        path: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Keep an integer first CSV column instead of treating it as frame numbers
        #[arg(long)]
        no_frame_index_detection: bool,
    },

    /// Write keypoints and per-frame labels to a single CSV
    Export {
        /// Keypoint file
        #[arg(name = "KEYPOINTS")]
        keypoints: PathBuf,

        /// Comma-separated label names file
        #[arg(long)]
        labels: PathBuf,

        /// Previously exported CSV to take label values from
        #[arg(long)]
        existing: Option<PathBuf>,

        /// Output path (default: <keypoints stem>_labels.csv)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Labels holding numbers instead of text
        #[arg(long = "numeric", value_name = "LABEL")]
        numeric: Vec<String>,

        /// Value of the climber_id column [default: climber_001]
        #[arg(long)]
        climber_id: Option<String>,

        /// Value of the route_id column [default: route_001]
        #[arg(long)]
        route_id: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Inspect {
            path,
            json,
            no_frame_index_detection,
        } => inspect::run(&path, json, !no_frame_index_detection).map(|loaded| {
            if loaded {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }),
        Commands::Export {
            keypoints,
            labels,
            existing,
            out,
            numeric,
            climber_id,
            route_id,
        } => export::run(&export::ExportArgs {
            keypoints,
            labels,
            existing,
            out,
            numeric,
            climber_id,
            route_id,
        })
        .map(|()| ExitCode::SUCCESS),
    }
}
