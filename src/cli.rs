//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Academy article renderer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory (default: current directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: academy.toml)
    #[arg(short = 'C', long, default_value = "academy.toml")]
    pub config: PathBuf,

    /// Base URL of the content API, overrides `[api].url`
    #[arg(long = "api-url", env = "ACADEMY_API_URL")]
    pub api_url: Option<String>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Fetch articles and render them into the output directory
    Build {
        /// Slugs to render. Renders every article when omitted
        slugs: Vec<String>,

        /// Output directory path (relative to project root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Clean output directory completely before building
        #[arg(long)]
        clean: bool,

        /// Minify the html content
        #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
        minify: Option<bool>,
    },

    /// Serve article pages, fetched and rendered on each request
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port you should provide
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the table of contents of one article
    Toc {
        /// Article slug
        slug: String,
    },

    /// Navigate between articles interactively, one slug per line on stdin
    Browse,
}
