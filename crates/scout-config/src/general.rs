//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default number of news headlines.
const fn default_news_limit() -> u32 {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Model used when `--model` is not given. Takes precedence over the
    /// remembered model; empty means use the remembered one.
    #[serde(default)]
    pub default_model: String,

    /// Default number of headlines for `scout news`.
    #[serde(default = "default_news_limit")]
    pub default_news_limit: u32,

    /// Override for the preferences file location.
    #[serde(default)]
    pub prefs_path: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_model: String::new(),
            default_news_limit: default_news_limit(),
            prefs_path: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert!(config.default_model.is_empty());
        assert!(config.prefs_path.is_empty());
        assert_eq!(config.default_news_limit, 4);
    }
}
