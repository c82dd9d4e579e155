// Configuration loader
// Loads the API base URL from ~/.dhclient/config.toml, overridden by environment variables

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::settings::ClientConfig;
use crate::errors::{config_missing_error, config_parse_error};

pub const API_BASE_URL_ENV: &str = "API_BASE_URL";
pub const USER_ID_ENV: &str = "DH_USER_ID";

/// Location of the config file (~/.dhclient/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".dhclient").join("config.toml"))
}

/// Load configuration from the config file and environment
///
/// `API_BASE_URL` and `DH_USER_ID` override the matching file values when set
/// to a non-empty string; either source alone is enough.
pub fn load_config() -> Result<ClientConfig> {
    let path = config_path()?;
    let file = if path.exists() {
        Some(load_config_from_path(&path)?)
    } else {
        None
    };

    let env_base_url = std::env::var(API_BASE_URL_ENV).ok();
    let env_user_id = std::env::var(USER_ID_ENV).ok();

    match apply_env_overrides(file, env_base_url, env_user_id) {
        Some(config) => Ok(config),
        None => bail!(config_missing_error(path.display(), API_BASE_URL_ENV)),
    }
}

/// Layer environment values over the file config (blank values are ignored)
fn apply_env_overrides(
    file: Option<ClientConfig>,
    base_url: Option<String>,
    user_id: Option<String>,
) -> Option<ClientConfig> {
    let non_blank = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let mut config = match (file, non_blank(base_url)) {
        (Some(mut config), Some(base_url)) => {
            config.api_base_url = base_url;
            config
        }
        (Some(config), None) => config,
        (None, Some(base_url)) => ClientConfig::new(base_url),
        (None, None) => return None,
    };

    if let Some(user_id) = non_blank(user_id) {
        config.user_id = Some(user_id);
    }
    Some(config)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path(path: &Path) -> Result<ClientConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut config: ClientConfig = match toml::from_str(&contents) {
        Ok(config) => config,
        Err(e) => bail!(config_parse_error(path.display(), &e.to_string())),
    };

    config.api_base_url = config.api_base_url.trim().to_string();
    if config.api_base_url.is_empty() {
        bail!("api_base_url in {} must not be empty", path.display());
    }

    Ok(config)
}
