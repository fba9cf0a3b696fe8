use std::path::Path;

use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
pub const ENV_PREFIX: &str = "AUTHDEMO_";

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the authentication backend lives and how long we wait for it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_backend_url(),
            timeout_in_ms: default_timeout_in_ms(),
        }
    }
}

/// The origin the client pretends to be served from. Relative locations
/// (`/`, `/dashboard?error=auth_failed`) are resolved against it.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_origin")]
    pub origin: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            origin: default_frontend_origin(),
        }
    }
}

/// Session cookie settings. `cookie_value` lets a session issued to a
/// browser be reused from the terminal.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub cookie_value: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_value: None,
        }
    }
}

fn default_backend_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_in_ms() -> u64 {
    5000
}

fn default_frontend_origin() -> String {
    "http://localhost:5173".to_string()
}

fn default_cookie_name() -> String {
    "wos_session".to_string()
}

/// Build the figment: defaults, then the YAML file, then `AUTHDEMO_*` env vars.
pub fn figment_for(path: impl AsRef<Path>) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::ConfigV1(ConfigV1::default())))
        .merge(Yaml::file(path.as_ref()))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from a YAML file, falling back to defaults when it is absent.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<ConfigV1, figment::Error> {
    extract(figment_for(path))
}

pub fn extract(figment: Figment) -> Result<ConfigV1, figment::Error> {
    match figment.extract::<Config>()? {
        Config::ConfigV1(c) => Ok(c),
    }
    // handle configuration migration between versions here when necessary
}

/// Render the JSON schema for the configuration.
pub fn config_schema() -> Result<String, serde_json::Error> {
    let schema = schema_for!(Config);
    serde_json::to_string_pretty(&schema)
}
