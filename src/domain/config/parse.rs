//! Pure parse/validate for `config.toml`.

use crate::domain::AppError;

use super::ScaffoldConfig;

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ScaffoldConfig, AppError> {
    let config: ScaffoldConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
