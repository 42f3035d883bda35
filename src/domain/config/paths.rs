//! Locations of the configuration file and the default starters directory.
//!
//! Functions take an environment lookup so callers and tests decide where
//! variables come from.

use std::ffi::OsString;
use std::path::PathBuf;

/// Overrides the configuration file location.
pub const CONFIG_ENV: &str = "MODCHART_CONFIG";
const APP_DIR: &str = "modchart";
const CONFIG_FILE: &str = "config.toml";
const STARTERS_DIR: &str = "starters";

/// `$MODCHART_CONFIG`, else `$XDG_CONFIG_HOME/modchart/config.toml`, else
/// `$HOME/.config/modchart/config.toml`.
pub fn config_file<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    if let Some(path) = non_empty(&env, CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    base_dir(&env, "XDG_CONFIG_HOME", ".config").map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

/// `$XDG_DATA_HOME/modchart/starters`, else `$HOME/.local/share/modchart/starters`.
pub fn default_starters_dir<F>(env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    base_dir(&env, "XDG_DATA_HOME", ".local/share").map(|dir| dir.join(APP_DIR).join(STARTERS_DIR))
}

fn base_dir<F>(env: &F, xdg_var: &str, home_fallback: &str) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    non_empty(env, xdg_var)
        .map(PathBuf::from)
        .or_else(|| non_empty(env, "HOME").map(|home| PathBuf::from(home).join(home_fallback)))
}

fn non_empty<F>(env: &F, key: &str) -> Option<OsString>
where
    F: Fn(&str) -> Option<OsString>,
{
    env(key).filter(|value| !value.is_empty())
}
