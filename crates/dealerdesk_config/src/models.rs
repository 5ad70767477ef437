use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite://data/dealerdesk.db, or DATABASE_URL
}

// --- CORS Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct CorsConfig {
    /// Origins allowed to call the API. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

// --- Client Config ---
// Consumed by the CRM client core, not by the API server.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClientConfig {
    /// Explicit form submission API base URL. Loaded via API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,
    /// Data provider selection key. Loaded via DATA_PROVIDER.
    #[serde(default = "default_data_provider")]
    pub data_provider: String,
}

fn default_data_provider() -> String {
    "mock".to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: None,
            data_provider: default_data_provider(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub client: ClientConfig,

    /// Directory holding the built client bundle (index.html + assets).
    #[serde(default)]
    pub static_dir: Option<String>,
}
