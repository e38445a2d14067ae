mod client_config;
mod config_loader;
mod model_catalog;
mod origin;


pub use client_config::{
    ClientConfig, ConfigProvider, RuntimeEnvironment, PLACEHOLDER_GOOGLE_CLIENT_ID,
    PLACEHOLDER_TURNSTILE_SITE_KEY,
};
pub use config_loader::{AppConfig, ConfigLoader, PublicConfig, ServerConfig};
pub use model_catalog::{ModelCatalog, BUILTIN_MODELS};
pub use origin::{Origin, Scheme};
