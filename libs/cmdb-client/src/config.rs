//! Client configuration
//!
//! Priority (highest to lowest):
//! 1. Environment variables (`CMDB_ADDRESS`, `CMDB_TIMEOUT_MS`)
//! 2. Config file (TOML, YAML or JSON, chosen by extension)
//! 3. Default values

use errors::{CmdbError, CmdbResult};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "CMDB_";

/// Connection settings for the v3 API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base address, e.g. `http://cmdb.example:8080`
    pub address: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8080".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl ClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load from defaults, an optional file and `CMDB_*` variables
    pub fn load(path: Option<&Path>) -> CmdbResult<Self> {
        Self::load_with_env(path, ENV_PREFIX)
    }

    /// Same as [`ClientConfig::load`] with a custom env prefix
    pub fn load_with_env(path: Option<&Path>, env_prefix: &str) -> CmdbResult<Self> {
        let mut figment = Figment::from(Serialized::defaults(ClientConfig::default()));

        if let Some(path) = path {
            figment = merge_file(figment, path)?;
        }

        let config: ClientConfig = figment
            .merge(Env::prefixed(env_prefix))
            .extract()
            .map_err(|e| CmdbError::Configuration(format!("Failed to load configuration: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> CmdbResult<()> {
        if !(self.address.starts_with("http://") || self.address.starts_with("https://")) {
            return Err(CmdbError::Configuration(format!(
                "address must start with http:// or https://, got '{}'",
                self.address
            )));
        }
        if self.timeout_ms == 0 {
            return Err(CmdbError::Configuration(
                "timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn merge_file(figment: Figment, path: &Path) -> CmdbResult<Figment> {
    if !path.exists() {
        return Err(CmdbError::Configuration(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| CmdbError::Configuration("Config file must have an extension".to_string()))?;

    match extension {
        "toml" => Ok(figment.merge(Toml::file(path))),
        "yaml" | "yml" => Ok(figment.merge(Yaml::file(path))),
        "json" => Ok(figment.merge(Json::file(path))),
        _ => Err(CmdbError::Configuration(format!(
            "Unsupported config file format: {}",
            extension
        ))),
    }
}
