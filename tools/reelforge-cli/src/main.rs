//! Reelforge CLI — assemble trailers from an edit plan and scene assets.
//!
//! Usage:
//!   reelforge render <MANIFEST>     Render a manifest to a video file
//!   reelforge validate <MANIFEST>   Check a manifest without rendering
//!   reelforge info <MANIFEST>       Show the edit plan summary
//!   reelforge check                 Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "reelforge",
    about = "Shot-list compositing engine for generated trailers",
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
    /// Render an assembly manifest to a muxed video file
    Render {
        /// Path to the assembly manifest (JSON)
        manifest: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output width
        #[arg(long, default_value = "1280")]
        width: u32,

        /// Output height
        #[arg(long, default_value = "720")]
        height: u32,

        /// Output frame rate
        #[arg(long, default_value = "30")]
        fps: u32,

        /// TTF font for text cards (system fonts are searched otherwise)
        #[arg(long)]
        font: Option<PathBuf>,
    },

    /// Validate a manifest: plan invariants and asset paths
    Validate {
        /// Path to the assembly manifest (JSON)
        manifest: PathBuf,
    },

    /// Show the edit plan summary for a manifest
    Info {
        /// Path to the assembly manifest (JSON)
        manifest: PathBuf,
    },

    /// Check system capabilities (encoders, fonts)
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    reelforge_common::logging::init_logging(&reelforge_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Render {
            manifest,
            output,
            width,
            height,
            fps,
            font,
        } => commands::render::run(manifest, output, width, height, fps, font).await,
        Commands::Validate { manifest } => commands::validate::run(manifest),
        Commands::Info { manifest } => commands::info::run(manifest),
        Commands::Check => commands::check::run(),
    }
}
