//! Environment variable handling for the DealerDesk application.
//!
//! Structured settings arrive as `DEALERDESK__SECTION__KEY` variables through
//! the `config` crate. This module covers the naming scheme and the handful of
//! conventional unprefixed variables (`PORT`, `ALLOWED_ORIGINS`, ...) that the
//! deployment scripts already export.

use std::env;

use crate::models::{AppConfig, DatabaseConfig};

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "DEALERDESK";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// # Arguments
///
/// * `path` - The configuration path (e.g., "server.host")
///
/// # Returns
///
/// The environment variable name (e.g., "DEALERDESK__SERVER__HOST")
pub fn config_path_to_env_var(path: &str) -> String {
    config_path_to_env_var_with_prefix(&get_config_prefix(), path)
}

fn config_path_to_env_var_with_prefix(prefix: &str, path: &str) -> String {
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Split a comma separated origin list, trimming entries and dropping empties.
pub fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

/// Apply the conventional unprefixed variables on top of a loaded config.
///
/// `API_PORT` wins over `PORT`. Values that fail to parse are ignored with a
/// warning so a stray variable cannot stop the server from starting.
pub fn apply_legacy_overrides(config: AppConfig) -> AppConfig {
    apply_overrides_from(config, |key| env::var(key).ok())
}

pub(crate) fn apply_overrides_from<F>(mut config: AppConfig, lookup: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup("API_PORT").or_else(|| lookup("PORT")) {
        match raw.trim().parse::<u16>() {
            Ok(port) => config.server.port = port,
            Err(_) => tracing::warn!("Ignoring invalid port value: {}", raw),
        }
    }

    if let Some(raw) = lookup("ALLOWED_ORIGINS") {
        config.cors.allowed_origins = parse_origin_list(&raw);
    }

    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
        config.database = Some(DatabaseConfig { url });
    }

    if let Some(base) = lookup("API_BASE_URL").filter(|b| !b.trim().is_empty()) {
        config.client.api_base_url = Some(base);
    }

    if let Some(key) = lookup("DATA_PROVIDER").filter(|k| !k.trim().is_empty()) {
        config.client.data_provider = key.trim().to_lowercase();
    }

    config
}
