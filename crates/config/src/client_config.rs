use crate::config_loader::AppConfig;
use crate::model_catalog::ModelCatalog;
use crate::origin::Origin;
use okitakoy_common::{ModelDescriptor, Result};
use serde::Serialize;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Shipped until deployment supplies the real Turnstile site key
pub const PLACEHOLDER_TURNSTILE_SITE_KEY: &str = "VOTRE_CLE_PUBLIQUE_TURNSTILE";
/// Shipped until deployment supplies the real OAuth client id
pub const PLACEHOLDER_GOOGLE_CLIENT_ID: &str = "VOTRE_GOOGLE_CLIENT_ID.apps.googleusercontent.com";

static CLIENT_CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Ambient data the client configuration is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeEnvironment {
    origin: Origin,
    turnstile_site_key: String,
    google_client_id: String,
}

impl RuntimeEnvironment {
    /// Environment at `origin` with placeholder public identifiers
    pub fn new(origin: Origin) -> Self {
        Self {
            origin,
            turnstile_site_key: PLACEHOLDER_TURNSTILE_SITE_KEY.to_string(),
            google_client_id: PLACEHOLDER_GOOGLE_CLIENT_ID.to_string(),
        }
    }

    /// Override the Turnstile site key. Blank values are ignored.
    pub fn with_turnstile_site_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        if !key.trim().is_empty() {
            self.turnstile_site_key = key;
        }
        self
    }

    /// Override the Google OAuth client id. Blank values are ignored.
    pub fn with_google_client_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.google_client_id = id;
        }
        self
    }

    /// Derive the environment from server settings.
    ///
    /// An explicit public origin wins over the bind address.
    pub fn from_app_config(config: &AppConfig) -> Result<Self> {
        let origin = match config.public.origin.as_deref() {
            Some(origin) => Origin::parse(origin)?,
            None => Origin::from_bind(&config.server.host, config.server.port, config.server.tls)?,
        };

        let mut env = Self::new(origin);
        if let Some(key) = &config.public.turnstile_site_key {
            env = env.with_turnstile_site_key(key.clone());
        }
        if let Some(id) = &config.public.google_client_id {
            env = env.with_google_client_id(id.clone());
        }

        Ok(env)
    }

    pub fn origin(&self) -> &Origin {
        &self.origin
    }
}

/// Read-only configuration consumed by the browser frontend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    api_url: String,
    turnstile_site_key: String,
    google_client_id: String,
    models: ModelCatalog,
}

impl ClientConfig {
    /// Build the configuration for the given environment. Cannot fail.
    pub fn load(env: &RuntimeEnvironment) -> Self {
        let config = Self {
            api_url: env.origin.to_string(),
            turnstile_site_key: env.turnstile_site_key.clone(),
            google_client_id: env.google_client_id.clone(),
            models: ModelCatalog::builtin(),
        };

        debug!(
            api_url = %config.api_url,
            models = config.models.len(),
            "Client configuration loaded"
        );

        config
    }

    /// Look up a model descriptor by key
    pub fn get_model(&self, key: &str) -> Option<&ModelDescriptor> {
        self.models.get(key)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn turnstile_site_key(&self) -> &str {
        &self.turnstile_site_key
    }

    pub fn google_client_id(&self) -> &str {
        &self.google_client_id
    }

    pub fn models(&self) -> &ModelCatalog {
        &self.models
    }

    /// Whether `env` would produce this configuration
    pub(crate) fn matches_environment(&self, env: &RuntimeEnvironment) -> bool {
        self.api_url == env.origin.to_string()
            && self.turnstile_site_key == env.turnstile_site_key
            && self.google_client_id == env.google_client_id
    }

    /// Render the browser script defining the global `CONFIG` object
    pub fn to_script(&self) -> Result<String> {
        let body = serde_json::to_string_pretty(self)?;
        Ok(format!("const CONFIG = Object.freeze({});\n", body))
    }
}

/// Process-wide client configuration, set once at startup
pub struct ConfigProvider;

impl ConfigProvider {
    /// Initialise the global configuration.
    ///
    /// Only the first call builds a value; later calls return it unchanged.
    pub fn init(env: &RuntimeEnvironment) -> &'static ClientConfig {
        let mut built = false;
        let config = CLIENT_CONFIG.get_or_init(|| {
            built = true;
            info!(origin = %env.origin, "Initialising client configuration");
            ClientConfig::load(env)
        });
        if !built && !config.matches_environment(env) {
            debug!(
                requested = %env.origin,
                active = %config.api_url,
                "Client configuration already initialised, keeping first value"
            );
        }
        config
    }

    /// The global configuration, if `init` has run
    pub fn get() -> Option<&'static ClientConfig> {
        CLIENT_CONFIG.get()
    }
}
