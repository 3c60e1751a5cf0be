use clap::Subcommand;

/// Remembered preferences commands.
#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// Show remembered preferences (raw format prints the last result only).
    Show,
    /// Forget everything.
    Clear,
}
