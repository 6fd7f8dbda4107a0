//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eventsieve_core::LookaheadRange;

/// eventsieve - upcoming calendar events, minus the noise
#[derive(Debug, Parser)]
#[command(name = "eventsieve")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, global = true, env = "EVENTSIEVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// User whose saved filters are read and written
    #[arg(long, short, global = true, env = "EVENTSIEVE_USER")]
    pub user: Option<String>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Filter and display events from a file
    Show(ShowArgs),

    /// Saved exclusion filters
    Filters {
        #[command(subcommand)]
        action: FiltersAction,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Arguments for `eventsieve show`.
#[derive(Debug, Clone, Default, Args)]
pub struct ShowArgs {
    /// Events JSON: an array of events or an events.list response
    #[arg(long, short, env = "EVENTSIEVE_EVENTS")]
    pub events: PathBuf,

    /// Negation expression, e.g. "-sync,-demo"
    #[arg(long, allow_hyphen_values = true)]
    pub hide: Option<String>,

    /// Replace the expression with the saved filters
    #[arg(long, conflicts_with = "hide")]
    pub saved: bool,

    /// Look-ahead window: week, month or quarter
    #[arg(long)]
    pub range: Option<LookaheadRange>,

    /// Keep events that have no attendees
    #[arg(long)]
    pub keep_no_attendees: bool,

    /// Drop instances of recurring events
    #[arg(long)]
    pub skip_recurring: bool,

    /// Dashboard link; its `hide` parameter seeds the expression and the
    /// updated link is printed after the table
    #[arg(long)]
    pub link: Option<String>,

    /// Reference time (RFC 3339 or YYYY-MM-DD) instead of the current time
    #[arg(long)]
    pub now: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Fail if any event cannot be normalized
    #[arg(long)]
    pub strict: bool,
}

/// Saved filter actions.
#[derive(Debug, Subcommand)]
pub enum FiltersAction {
    /// Save the exclusions from an expression
    Save {
        /// Negation expression, e.g. "-sync,-demo"
        #[arg(long, allow_hyphen_values = true)]
        hide: String,
    },

    /// Print the saved filters as an expression for --hide
    Load,

    /// Show saved tokens and where they are stored
    Show,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Validate configuration
    Validate,

    /// Show configuration file path
    Path,
}
