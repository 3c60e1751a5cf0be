use anyhow::Context;
use scout_api::BackendClient;
use scout_config::ScoutConfig;
use scout_jobs::{ControllerConfig, ResearchJobController};
use scout_prefs::{Preferences, PrefsStore};

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: ScoutConfig,
    pub backend: BackendClient,
    prefs: Option<PrefsStore>,
}

impl AppContext {
    pub fn init(config: ScoutConfig) -> anyhow::Result<Self> {
        let backend =
            BackendClient::from_config(&config.api).context("failed to build backend client")?;

        let prefs = match PrefsStore::from_config_path(&config.general.prefs_path) {
            Ok(store) => Some(store),
            Err(error) => {
                tracing::warn!(%error, "preferences disabled");
                None
            }
        };

        Ok(Self {
            config,
            backend,
            prefs,
        })
    }

    pub fn prefs(&self) -> anyhow::Result<&PrefsStore> {
        self.prefs
            .as_ref()
            .context("no preferences location; set general.prefs_path")
    }

    /// Saved preferences, or defaults when they cannot be read.
    pub fn load_prefs(&self) -> Preferences {
        let Some(store) = &self.prefs else {
            return Preferences::default();
        };
        store.load().unwrap_or_else(|error| {
            tracing::warn!(%error, "ignoring unreadable preferences");
            Preferences::default()
        })
    }

    pub fn controller(&self) -> ResearchJobController<BackendClient> {
        ResearchJobController::new(
            self.backend.clone(),
            ControllerConfig::from_config(&self.config),
        )
    }
}
