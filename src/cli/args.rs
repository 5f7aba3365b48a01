//! Command-line interface definitions.

use crate::config::DEFAULT_CONFIG;
use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// rssgen: render feed definitions into RSS 2.0 files
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Print debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a feed definition to `{output}/{name}.rss`
    #[command(visible_alias = "r")]
    Render {
        /// Feed definition file
        #[arg(
            short = 'C',
            long,
            default_value = DEFAULT_CONFIG,
            value_hint = clap::ValueHint::FilePath
        )]
        config: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "public", value_hint = clap::ValueHint::DirPath)]
        output: PathBuf,

        /// Write without indentation
        #[arg(long)]
        compact: bool,
    },

    /// Summarize an existing RSS file
    #[command(visible_alias = "i")]
    Inspect {
        /// RSS file to read
        #[arg(value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
}
