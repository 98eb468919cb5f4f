use std::net::SocketAddr;

use kxy_client::{ClientConfig, ConfigError};
use serde::Deserialize;
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config.example.toml";

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    /// Backend the browser talks to.
    pub api: ClientConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        format!("{}:{}", self.bind, self.port).parse().ok()
    }
}

/// Value of `--config <path>`, or the example config.
pub fn path_from_args(args: impl IntoIterator<Item = String>) -> String {
    let args: Vec<String> = args.into_iter().collect();
    args.iter()
        .position(|a| a == "--config")
        .and_then(|idx| args.get(idx + 1).cloned())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.into())
}

impl Config {
    pub fn read(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        Ok(toml::from_str(&contents)?)
    }
}

/// [`Config::read`], falling back to defaults so the console still starts.
pub fn load(path: &str) -> Config {
    Config::read(path).unwrap_or_else(|e| {
        warn!("{e}, using defaults");
        Config::default()
    })
}
