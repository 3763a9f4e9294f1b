//! Configuration file management.

mod manager;

pub use manager::{
    ApiConfig, ConfigFile, ConfigManager, DEFAULT_API_KEY_ENV, DefaultsConfig, ResolveOptions,
    ResolvedConfig, as_translate_error, resolve_config,
};
