//! # scout-prefs
//!
//! Remembers the last query, its result and the user's model and mode
//! choices between runs.
//!
//! Preferences are one pretty-printed JSON document, rewritten whole on every
//! save (last write wins). The default location is
//! `<data_dir>/scout/preferences.json`; `general.prefs_path` overrides it.

mod error;

pub use error::PrefsError;

use std::fs;
use std::path::{Path, PathBuf};

use scout_core::{DEFAULT_MODEL, JobOptions, Mode};
use serde::{Deserialize, Serialize};

const PREFS_FILE_NAME: &str = "preferences.json";

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

const fn default_true() -> bool {
    true
}

/// Everything remembered between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_query: Option<String>,

    /// Markdown of the last completed job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<String>,

    #[serde(default = "default_model")]
    pub selected_model: String,

    #[serde(default)]
    pub search_mode: Mode,

    #[serde(default = "default_true")]
    pub use_planner: bool,

    #[serde(default = "default_true")]
    pub headless: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_query: None,
            last_result: None,
            selected_model: default_model(),
            search_mode: Mode::default(),
            use_planner: true,
            headless: true,
        }
    }
}

impl Preferences {
    #[must_use]
    pub const fn options(&self) -> JobOptions {
        JobOptions {
            use_planner: self.use_planner,
            headless: self.headless,
        }
    }

    /// Store `query` unless it is blank; a blank query never erases the last one.
    pub fn remember_query(&mut self, query: &str) {
        if !query.trim().is_empty() {
            self.last_query = Some(query.trim().to_string());
        }
    }

    /// Store `result` unless it is blank.
    pub fn remember_result(&mut self, result: &str) {
        if !result.trim().is_empty() {
            self.last_result = Some(result.to_string());
        }
    }
}

/// File-backed preferences.
#[derive(Debug, Clone)]
pub struct PrefsStore {
    path: PathBuf,
}

impl PrefsStore {
    /// A store at an explicit path. Nothing is read or created yet.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A store at `configured` if non-empty, otherwise at [`default_path`](Self::default_path).
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::NoDataDir`] when no path is configured and the
    /// platform has no data directory.
    pub fn from_config_path(configured: &str) -> Result<Self, PrefsError> {
        let configured = configured.trim();
        if !configured.is_empty() {
            return Ok(Self::open(configured));
        }
        Self::default_path()
            .map(Self::open)
            .ok_or(PrefsError::NoDataDir)
    }

    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join("scout").join(PREFS_FILE_NAME))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read preferences. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] if the file exists but cannot be read and
    /// [`PrefsError::Json`] if it is not valid preferences JSON.
    pub fn load(&self) -> Result<Preferences, PrefsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(source) => return Err(self.io_error(source)),
        };
        if raw.trim().is_empty() {
            return Ok(Preferences::default());
        }
        serde_json::from_str(&raw).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })
    }

    /// Replace the stored preferences with `prefs`.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] if the directory or file cannot be written.
    pub fn save(&self, prefs: &Preferences) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|source| PrefsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(prefs).map_err(|source| PrefsError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        tracing::debug!(path = %self.path.display(), "preferences saved");
        Ok(())
    }

    /// Load, modify and save in one step. Returns the saved preferences.
    ///
    /// # Errors
    ///
    /// See [`load`](Self::load) and [`save`](Self::save).
    pub fn update(&self, change: impl FnOnce(&mut Preferences)) -> Result<Preferences, PrefsError> {
        let mut prefs = self.load()?;
        change(&mut prefs);
        self.save(&prefs)?;
        Ok(prefs)
    }

    /// Remove every stored preference.
    ///
    /// # Errors
    ///
    /// Returns [`PrefsError::Io`] if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<(), PrefsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "preferences cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    fn io_error(&self, source: std::io::Error) -> PrefsError {
        PrefsError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store() -> (tempfile::TempDir, PrefsStore) {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let store = PrefsStore::open(tmp.path().join("nested").join(PREFS_FILE_NAME));
        (tmp, store)
    }

    #[test]
    fn missing_file_loads_defaults() {
        let (_tmp, store) = store();
        let prefs = store.load().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.selected_model, "gemini-2.5-pro-preview");
        assert_eq!(prefs.search_mode, Mode::Search);
        assert!(prefs.use_planner);
        assert!(prefs.headless);
    }

    #[test]
    fn save_then_load_returns_same_preferences() {
        let (_tmp, store) = store();
        let prefs = Preferences {
            last_query: Some("rust borrow checker history".into()),
            last_result: Some("# Report".into()),
            selected_model: "gemini-2.0-flash".into(),
            search_mode: Mode::Research,
            use_planner: false,
            headless: false,
        };
        store.save(&prefs).unwrap();
        assert_eq!(store.load().unwrap(), prefs);
    }

    #[test]
    fn last_write_wins() {
        let (_tmp, store) = store();
        store
            .update(|p| p.selected_model = "gpt-4o".into())
            .unwrap();
        store
            .update(|p| p.selected_model = "claude-3.5".into())
            .unwrap();
        assert_eq!(store.load().unwrap().selected_model, "claude-3.5");
    }

    #[test]
    fn blank_query_does_not_erase_previous() {
        let (_tmp, store) = store();
        store.update(|p| p.remember_query("first query")).unwrap();
        let prefs = store
            .update(|p| {
                p.remember_query("   ");
                p.remember_result("");
            })
            .unwrap();
        assert_eq!(prefs.last_query.as_deref(), Some("first query"));
        assert!(prefs.last_result.is_none());
    }

    #[test]
    fn clear_removes_everything_and_is_idempotent() {
        let (_tmp, store) = store();
        store.update(|p| p.remember_query("q")).unwrap();
        assert!(store.path().exists());

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(!store.path().exists());
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), r#"{"search_mode": "research"}"#).unwrap();

        let prefs = store.load().unwrap();
        assert_eq!(prefs.search_mode, Mode::Research);
        assert_eq!(prefs.selected_model, DEFAULT_MODEL);
        assert!(prefs.options().use_planner);
    }

    #[test]
    fn corrupt_file_is_json_error() {
        let (_tmp, store) = store();
        std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        std::fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(PrefsError::Json { .. })));
    }

    #[test]
    fn configured_path_overrides_default() {
        let store = PrefsStore::from_config_path(" /tmp/scout-prefs.json ").unwrap();
        assert_eq!(store.path(), Path::new("/tmp/scout-prefs.json"));
    }

    #[test]
    fn default_path_ends_with_scout_preferences() {
        if let Some(path) = PrefsStore::default_path() {
            assert!(path.ends_with("scout/preferences.json"));
        }
    }
}
