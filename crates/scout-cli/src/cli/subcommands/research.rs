use clap::Subcommand;

/// Backend research job commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResearchCommands {
    /// Show the backend record of a job.
    Status { id: String },
    /// Print the final report of a completed job.
    Report { id: String },
    /// Ask the backend to stop a job.
    Stop { id: String },
    /// List every job the backend knows about.
    List,
}
