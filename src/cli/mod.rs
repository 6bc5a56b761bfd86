use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::constants::git::DEFAULT_HEAD;

#[derive(Parser)]
#[command(name = "monobuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Repository root holding the service directories and monobuild.toml
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// File to append step outputs to (defaults to $GITHUB_OUTPUT, then stdout)
    #[arg(long, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the build matrix of services changed since a base revision
    Matrix {
        /// Base revision to diff against
        /// If not specified, read from PR_BASE_SHA or BEFORE_SHA depending on EVENT_NAME
        #[arg(long)]
        base: Option<String>,

        /// Revision holding the changes
        #[arg(long, default_value = DEFAULT_HEAD)]
        head: String,
    },

    /// Render extra image tags from Dockerfile build arguments
    Tags {
        /// Service directory containing the descriptor
        #[arg(long)]
        service_dir: PathBuf,

        /// Dockerfile to read build arguments from
        /// Defaults to the Dockerfile named by the service descriptor
        #[arg(long)]
        dockerfile: Option<PathBuf>,

        /// Image reference the tags are appended to (e.g., ghcr.io/acme/api)
        #[arg(long)]
        image: String,
    },

    /// Show version information
    Version,
}
