use crate::origin::Origin;
use okitakoy_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub public: PublicConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Whether the server is reached over HTTPS
    #[serde(default)]
    pub tls: bool,
}

/// Values published to the browser. Public identifiers only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicConfig {
    /// Origin browsers use to reach the API, when it differs from the bind address
    pub origin: Option<String>,
    pub turnstile_site_key: Option<String>,
    pub google_client_id: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8081,
                tls: false,
            },
            public: PublicConfig::default(),
        }
    }
}

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from file or defaults, then apply environment overrides
    pub fn load(path: Option<&PathBuf>) -> Result<AppConfig> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigLoader::load`], reading overrides from `lookup`
    pub fn load_with_env<F>(path: Option<&PathBuf>, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self::load_file(path)?;
        Self::apply_env_overrides(config, lookup)
    }

    fn load_file(path: Option<&PathBuf>) -> Result<AppConfig> {
        if let Some(path) = path {
            if path.exists() {
                return Self::read(path);
            }
            debug!(path = %path.display(), "Config file not found, searching defaults");
        }

        // Check default locations
        let default_paths = vec![
            PathBuf::from("okitakoy.json"),
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("okitakoy/config.json"),
        ];

        for path in default_paths {
            if path.exists() {
                return Self::read(&path);
            }
        }

        // Use defaults
        Ok(AppConfig::default())
    }

    fn read(path: &PathBuf) -> Result<AppConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Apply `OKITAKOY_*` and public identifier overrides from `lookup`
    pub fn apply_env_overrides<F>(mut config: AppConfig, lookup: F) -> Result<AppConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(host) = lookup("OKITAKOY_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("OKITAKOY_PORT") {
            config.server.port = port
                .trim()
                .parse()
                .ok()
                .filter(|p: &u16| *p != 0)
                .ok_or_else(|| {
                    Error::ConfigError(format!("OKITAKOY_PORT is not a valid port: {}", port))
                })?;
        }

        if let Some(origin) = lookup("OKITAKOY_ORIGIN") {
            Origin::parse(&origin)?;
            config.public.origin = Some(origin);
        }

        if let Some(key) = lookup("TURNSTILE_SITE_KEY") {
            config.public.turnstile_site_key = Some(key);
        }

        if let Some(id) = lookup("GOOGLE_CLIENT_ID") {
            config.public.google_client_id = Some(id);
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(config: &AppConfig, path: &PathBuf) -> Result<()> {
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
