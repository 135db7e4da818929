//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: schedule an event and print (or export) the result
//! - check: load and validate an event file
//! - demand: show talk popularity and competing pairs

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Summit - two-block workshop scheduler
#[derive(Parser, Debug)]
#[command(name = "summit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Schedule an event file
    Run {
        /// Event file (YAML, or JSON by .json extension)
        input: PathBuf,

        /// How many top-ranked talks count toward demand and conflicts
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Optimizer pass cap
        #[arg(long)]
        max_passes: Option<u32>,

        /// Write report and assignments here (.json, .yml or .yaml)
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Load and validate an event file without scheduling
    Check {
        /// Event file
        input: PathBuf,
    },

    /// Show talks by demand score and the most competing pairs
    Demand {
        /// Event file
        input: PathBuf,

        /// Ranking window
        #[arg(short = 'k', long)]
        top_k: Option<usize>,
    },
}
