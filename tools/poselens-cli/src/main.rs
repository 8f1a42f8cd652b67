//! Poselens CLI — Pose analysis for movement videos.
//!
//! Usage:
//!   poselens analyze <VIDEO>   Analyze a video and print the JSON payload
//!   poselens check             Check system prerequisites
//!
//! The analysis payload is written to stdout as exactly one JSON line;
//! everything else (progress, diagnostics, the delimited debug copy of the
//! payload) goes to stderr. Any failure exits with code 1 and leaves stdout
//! untouched.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "poselens",
    about = "Biomechanical pose analysis for movement videos",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a movement video
    Analyze {
        /// Path to the video file
        video: PathBuf,

        /// Path to the pose landmarker model asset (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,

        /// Fixed sampling stride (analyze every Nth frame)
        #[arg(long)]
        stride: Option<u32>,

        /// Derive the stride from the video frame rate (about one sample
        /// per second) instead of using a fixed stride
        #[arg(long)]
        per_second: bool,

        /// Hard ceiling on the number of frames read from the video
        #[arg(long)]
        max_frames: Option<u64>,

        /// Secondary downsample factor for the reported frame list
        #[arg(long)]
        downsample: Option<usize>,

        /// Emit the landmarks-only payload instead of the metric summary
        #[arg(long)]
        simple: bool,
    },

    /// Check decode and inference prerequisites
    Check {
        /// Path to the pose landmarker model asset (overrides config)
        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    // try_parse so that a missing or malformed argument exits 1 like every
    // other failure, instead of clap's default exit code.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version requests are not failures.
            if e.use_stderr() {
                eprint!("{e}");
                return ExitCode::from(1);
            }
            print!("{e}");
            return ExitCode::SUCCESS;
        }
    };

    let config = poselens_common::config::AnalyzerConfig::load();
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    poselens_common::logging::init_logging(&poselens_common::config::LoggingConfig {
        level: log_level,
        json: config.logging.json,
    });

    let result = match cli.command {
        Commands::Analyze {
            video,
            model,
            stride,
            per_second,
            max_frames,
            downsample,
            simple,
        } => commands::analyze::run(
            &config,
            commands::analyze::AnalyzeArgs {
                video,
                model,
                stride,
                per_second,
                max_frames,
                downsample,
                simple,
            },
        ),
        Commands::Check { model } => commands::check::run(&config, model),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(1)
        }
    }
}
