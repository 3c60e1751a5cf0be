use clap::Subcommand;

/// Configuration commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration.
    Show,
    /// Print the config file locations.
    Path,
    /// Write a default config file.
    Init {
        /// Write the user-level file instead of `.scout/config.toml`.
        #[arg(long)]
        global: bool,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}
