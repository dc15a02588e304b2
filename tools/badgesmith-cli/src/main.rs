//! Badgesmith CLI: compose personalized event badges.
//!
//! Usage:
//!   badgesmith render [OPTIONS]    Compose a badge and write badge.png
//!   badgesmith layout [OPTIONS]    Print photo placement and caption lines as JSON
//!   badgesmith check               Check fonts and background templates
//!   badgesmith init                Write the default config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::inputs::BadgeArgs;

#[derive(Parser)]
#[command(
    name = "badgesmith",
    about = "Compose personalized event badges from a photo and a caption",
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
    /// Compose a badge and export it as badge.png
    Render {
        #[command(flatten)]
        badge: BadgeArgs,

        /// Output directory (defaults to the configured output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print where the photo and caption lines land, without rasterizing
    Layout {
        #[command(flatten)]
        badge: BadgeArgs,
    },

    /// Check fonts and background templates
    Check {
        /// Caption font to test instead of the configured one
        #[arg(long)]
        font: Option<PathBuf>,
    },

    /// Write the default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_error) = badgesmith_common::config::AppConfig::load_or_default();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    badgesmith_common::logging::init_logging(&logging);

    if let Some(e) = config_error {
        tracing::warn!(
            error = %e,
            path = %badgesmith_common::config::config_file_path().display(),
            "Config unusable, falling back to defaults"
        );
    }

    match cli.command {
        Commands::Render { badge, output } => commands::render::run(badge, output, &config).await,
        Commands::Layout { badge } => commands::layout::run(badge, &config),
        Commands::Check { font } => commands::check::run(font, &config),
        Commands::Init { force } => commands::init::run(force),
    }
}
