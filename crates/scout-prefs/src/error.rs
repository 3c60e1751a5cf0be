use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preferences I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preferences file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no data directory found; set general.prefs_path")]
    NoDataDir,
}
