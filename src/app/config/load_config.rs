//! Configuration loading from `config.toml`.

use std::env;
use std::path::{Path, PathBuf};

use log::debug;

use crate::domain::config::{self, ScaffoldConfig, paths};
use crate::domain::AppError;
use crate::ports::ScaffoldStore;

/// Load configuration from its default location.
///
/// A missing file yields defaults unless `$MODCHART_CONFIG` names it
/// explicitly.
pub fn load_config<S: ScaffoldStore + ?Sized>(store: &S) -> Result<ScaffoldConfig, AppError> {
    let explicit = env::var_os(paths::CONFIG_ENV).is_some_and(|value| !value.is_empty());
    match paths::config_file(|key| env::var_os(key)) {
        Some(path) => load_config_from(store, &path, explicit),
        None => Ok(ScaffoldConfig::default()),
    }
}

/// Load and validate the configuration at `path`.
pub fn load_config_from<S: ScaffoldStore + ?Sized>(
    store: &S,
    path: &Path,
    required: bool,
) -> Result<ScaffoldConfig, AppError> {
    if !store.exists(path) {
        if required {
            return Err(AppError::config_error(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        debug!("No config at {}, using defaults", path.display());
        return Ok(ScaffoldConfig::default());
    }

    let content = store.read_file(path).map_err(|e| {
        AppError::config_error(format!("cannot read config file {}: {}", path.display(), e))
    })?;
    debug!("Loaded config from {}", path.display());
    config::parse_config_content(&content)
}

/// Directory relative starter names resolve against.
pub fn starters_dir(config: &ScaffoldConfig) -> Option<PathBuf> {
    config.starters.dir.clone().or_else(|| paths::default_starters_dir(|key| env::var_os(key)))
}
