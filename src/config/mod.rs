//! Configuration file management and resolution of effective settings.

mod manager;

pub use manager::{
    ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    LinguaConfig, ProviderConfig, ResolveOptions, ResolvedConfig, resolve_config,
};
