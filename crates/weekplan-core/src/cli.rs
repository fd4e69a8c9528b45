use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::stats::StatMode;
use crate::task::Day;
use crate::view::Filter;

#[derive(Parser, Debug)]
#[command(
    name = "weekplan",
    version,
    about = "Weekplan: a weekly task planner",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Data directory (defaults to $WEEKPLAN_DATA, then the platform data dir).
    #[arg(long = "data")]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a task to a day (today when no day is given).
    Add {
        text: String,

        #[arg(long, value_parser = parse_day)]
        day: Option<Day>,
    },

    /// Show one day's tasks, or the whole week.
    List {
        #[arg(value_parser = parse_day)]
        day: Option<Day>,

        /// Restrict to pending or completed tasks.
        #[arg(long, default_value = "all", value_parser = parse_filter)]
        filter: Filter,

        /// Show all seven days.
        #[arg(long)]
        week: bool,
    },

    /// Replace a task's text.
    Edit { id: String, text: String },

    /// Flip a task's completed flag.
    Toggle { id: String },

    /// Delete a task.
    Delete { id: String },

    /// Move a task to another day.
    Move {
        id: String,

        #[arg(value_parser = parse_day)]
        day: Day,
    },

    /// Copy a task into every other day of the week.
    Replicate { id: String },

    /// Completion statistics.
    Stats {
        #[arg(default_value = "daily", value_parser = parse_mode)]
        mode: StatMode,

        /// Window weekly/monthly by creation date instead of counting
        /// the whole collection.
        #[arg(long)]
        windowed: bool,
    },

    /// Show or toggle the dark-mode preference.
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn parse_day(s: &str) -> anyhow::Result<Day> {
    s.parse()
}

fn parse_filter(s: &str) -> anyhow::Result<Filter> {
    s.parse()
}

fn parse_mode(s: &str) -> anyhow::Result<StatMode> {
    s.parse()
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
