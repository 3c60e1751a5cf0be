mod config;
mod history;
mod research;

pub use config::ConfigCommands;
pub use history::HistoryCommands;
pub use research::ResearchCommands;
