//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for gatherly
#[derive(Parser, Debug)]
#[command(name = "gatherly")]
#[command(author, version, about = "Hangout consensus engine - route, vote, finalize, RSVP")]
#[command(long_about = r#"
Gatherly decides how a hangout gets locked in.

A newly created hangout is routed by its shape: quick plans and
single-option hangouts skip voting and go straight to RSVP collection,
while multi-option hangouts open a poll. Ballots toggle, each voter may
flag one preferred choice, and once the leading option's share clears the
configured threshold among enough ballots, finalization locks the plan
and seeds RSVP placeholders for every participant.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./gatherly.toml     Project-level config
3. ~/.config/gatherly/config.toml   Global config

Example:
  gatherly simulate --participants 5 --options 3
  gatherly simulate --quick
  gatherly evaluate --counts a=6,b=4 --threshold 60 --min-votes 5
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress decorative output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a scripted hangout end to end: create, vote, finalize, RSVP
    Simulate {
        /// Number of participants casting ballots
        #[arg(long, default_value_t = 5)]
        participants: usize,

        /// Number of candidate options
        #[arg(long, default_value_t = 3)]
        options: usize,

        /// Create a quick plan (skips voting entirely)
        #[arg(long)]
        quick: bool,

        /// Restrict each participant to a single vote
        #[arg(long)]
        single_choice: bool,

        /// Consensus threshold override, in percent
        #[arg(long, value_name = "PERCENT")]
        threshold: Option<f64>,

        /// Minimum ballot count override
        #[arg(long, value_name = "N")]
        min_votes: Option<usize>,
    },

    /// Evaluate a tally without creating anything
    Evaluate {
        /// Comma-separated per-option counts, e.g. "a=6,b=4"
        #[arg(long, value_name = "COUNTS")]
        counts: String,

        /// Consensus threshold, in percent
        #[arg(long, default_value_t = 50.0, value_name = "PERCENT")]
        threshold: f64,

        /// Minimum ballot count
        #[arg(long, default_value_t = 1, value_name = "N")]
        min_votes: usize,
    },
}
