use std::path::{Path, PathBuf};

use anyhow::Context;
use scout_config::{PROJECT_CONFIG_PATH, ScoutConfig};
use scout_prefs::PrefsStore;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ConfigCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ConfigPaths {
    global: Option<PathBuf>,
    project: PathBuf,
    prefs: Option<PathBuf>,
}

/// Handle `scout config`.
pub fn handle(action: &ConfigCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ConfigCommands::Show => output(&ctx.config, flags.format),
        ConfigCommands::Path => {
            let paths = ConfigPaths {
                global: ScoutConfig::global_config_path(),
                project: PathBuf::from(PROJECT_CONFIG_PATH),
                prefs: ctx
                    .prefs()
                    .ok()
                    .map(|store| store.path().to_path_buf())
                    .or_else(PrefsStore::default_path),
            };
            output(&paths, flags.format)
        }
        ConfigCommands::Init { global, force } => {
            let path = if *global {
                ScoutConfig::global_config_path()
                    .context("no user config directory on this platform")?
            } else {
                PathBuf::from(PROJECT_CONFIG_PATH)
            };
            write_default_config(&path, *force)?;
            if !flags.quiet {
                eprintln!("wrote {}", path.display());
            }
            Ok(())
        }
    }
}

/// Write the built-in defaults as TOML. Refuses to overwrite unless `force`.
fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let toml = toml::to_string_pretty(&ScoutConfig::default())
        .context("failed to serialize default config")?;
    std::fs::write(path, toml).with_context(|| format!("failed to write {}", path.display()))
}
