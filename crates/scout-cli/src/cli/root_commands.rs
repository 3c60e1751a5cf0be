use clap::{Args, Subcommand};
use scout_core::Mode;

use crate::cli::subcommands::{ConfigCommands, HistoryCommands, ResearchCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run a search or deep research query and print the result.
    Run(RunArgs),
    /// Inspect or stop research jobs on the backend.
    Research {
        #[command(subcommand)]
        action: ResearchCommands,
    },
    /// List providers and their models.
    Providers,
    /// Show the weather widget.
    Weather,
    /// Show news headlines.
    News(NewsArgs),
    /// Show or clear the remembered query, result and choices.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// Show or create configuration.
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Query text. Words are joined with spaces.
    pub query: Vec<String>,

    /// Model id (defaults to config, then the last model used).
    #[arg(short, long)]
    pub model: Option<String>,

    /// search or research (alias: deep). Defaults to the last mode used.
    #[arg(long, value_parser = parse_mode)]
    pub mode: Option<Mode>,

    /// Re-run the last remembered query.
    #[arg(long, conflicts_with = "query")]
    pub again: bool,

    /// Let the backend plan research steps (default: the last choice).
    #[arg(long, overrides_with = "no_planner")]
    pub planner: bool,

    /// Skip the backend's planning step.
    #[arg(long, overrides_with = "planner")]
    pub no_planner: bool,

    /// Run the backend browser without a window (default: the last choice).
    #[arg(long, overrides_with = "headed")]
    pub headless: bool,

    /// Show the backend browser window.
    #[arg(long, overrides_with = "headless")]
    pub headed: bool,

    /// Do not remember this query or its result.
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Clone, Debug, Args)]
pub struct NewsArgs {
    /// Number of headlines (defaults to general.default_news_limit).
    #[arg(short, long)]
    pub limit: Option<u32>,
}

fn parse_mode(value: &str) -> Result<Mode, String> {
    value.parse::<Mode>().map_err(|error| error.to_string())
}
