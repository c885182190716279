//! sitelink - deferred intra-site link validation for rendered pages.

mod cli;
mod config;
mod dom;
mod link;
mod logger;
mod pipeline;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    let config = SiteConfig::load(&cli)?;

    match &cli.command {
        Commands::Validate { args } => cli::validate::validate_site(&config, args),
        Commands::Anchors { args } => cli::anchors::dump_anchors(&config, args),
    }
}
