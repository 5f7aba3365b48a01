//! rssgen - render feed definitions into RSS 2.0 files.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use rssgen::{
    cli::{self, Cli, Commands},
    logger,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    match &cli.command {
        Commands::Render {
            config,
            output,
            compact,
        } => cli::render_feed(config, output, *compact).map(|_| ()),
        Commands::Inspect { file } => cli::inspect_feed(file).map(|_| ()),
    }
}
