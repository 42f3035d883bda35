//! User configuration (`config.toml`).

pub mod parse;
pub mod paths;

use std::path::PathBuf;

use serde::Deserialize;

use super::chart::ChartMetadata;
use super::identifiers::ChartName;
use super::AppError;

pub use parse::parse_config_content;

/// Chart API version written into new charts.
pub const CHART_API_VERSION: &str = "v2";

/// Configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScaffoldConfig {
    /// Where starter charts are looked up.
    #[serde(default)]
    pub starters: StartersConfig,
    /// Metadata defaults for new charts.
    #[serde(default)]
    pub chart: ChartDefaults,
}

/// Starter chart lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartersConfig {
    /// Directory relative starter names resolve against. Falls back to the
    /// platform data directory when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Values written into `Chart.yaml` of new charts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartDefaults {
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_app_version")]
    pub app_version: String,
}

impl Default for ChartDefaults {
    fn default() -> Self {
        Self {
            description: default_description(),
            version: default_version(),
            app_version: default_app_version(),
        }
    }
}

fn default_description() -> String {
    "A Helm chart for Kubernetes".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_app_version() -> String {
    "1.16.0".to_string()
}

impl ChartDefaults {
    /// Metadata of a new application chart named `name`.
    pub fn metadata(&self, name: &ChartName) -> ChartMetadata {
        ChartMetadata {
            api_version: CHART_API_VERSION.to_string(),
            name: name.to_string(),
            description: Some(self.description.clone()),
            chart_type: Some("application".to_string()),
            version: self.version.clone(),
            app_version: Some(self.app_version.clone()),
        }
    }
}

impl ScaffoldConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.chart.version.trim().is_empty() {
            return Err(AppError::config_error("chart.version must not be empty"));
        }
        if self.chart.app_version.trim().is_empty() {
            return Err(AppError::config_error("chart.app_version must not be empty"));
        }
        Ok(())
    }
}
