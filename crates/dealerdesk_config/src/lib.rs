use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::PathBuf;

pub mod env_vars;
pub mod models;

pub use env_vars::apply_legacy_overrides;
pub use models::*;

/// Base URL used when no override is configured and the client runs locally.
pub const LOCAL_API_BASE_URL: &str = "http://localhost:4000";

/// Loads the layered application configuration.
///
/// Sources, later ones winning: built-in defaults, `config/default.toml`,
/// `config/<RUN_ENV>.toml`, `<PREFIX>__SECTION__KEY` environment variables and
/// finally the conventional unprefixed variables handled by
/// [`env_vars::apply_legacy_overrides`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let prefix = env_vars::get_config_prefix();
    let config_dir = PathBuf::from(env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string()));

    let default_path = config_dir.join("default");
    let env_path = config_dir.join(&run_env);

    tracing::debug!("config: default_path: {}", default_path.display());
    tracing::debug!("config: env_path: {}", env_path.display());

    let builder = Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 4000)?
        .set_default("client.data_provider", "mock")?
        .set_default("static_dir", "dist")?
        .add_source(File::with_name(&default_path.to_string_lossy()).required(false))
        .add_source(File::with_name(&env_path.to_string_lossy()).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw_config: AppConfig = builder.build()?.try_deserialize()?;
    Ok(apply_legacy_overrides(raw_config))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file defaults to `.env`; `DOTENV_OVERRIDE` names another one. Loading
/// happens at most once per process. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = std::env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Resolves the form submission API base URL for a client.
///
/// An explicit override wins (trailing slash stripped). Otherwise a client
/// served from `localhost`/`127.0.0.1` talks to the local API server, and any
/// other page talks to its own origin. Without a page origin the local server
/// is assumed.
pub fn resolve_api_base_url(override_url: Option<&str>, page_origin: Option<&str>) -> String {
    if let Some(configured) = override_url
        .map(|url| url.trim().trim_end_matches('/'))
        .filter(|url| !url.is_empty())
    {
        return configured.to_string();
    }

    match page_origin {
        Some(origin) => {
            let host = origin_host(origin);
            if host == "localhost" || host == "127.0.0.1" {
                LOCAL_API_BASE_URL.to_string()
            } else {
                origin.trim_end_matches('/').to_string()
            }
        }
        None => LOCAL_API_BASE_URL.to_string(),
    }
}

fn origin_host(origin: &str) -> &str {
    let without_scheme = origin.split_once("://").map_or(origin, |(_, rest)| rest);
    let authority = without_scheme.split('/').next().unwrap_or_default();
    authority.split(':').next().unwrap_or_default()
}
