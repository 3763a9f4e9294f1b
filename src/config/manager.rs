use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths;
use crate::translation::{DEFAULT_ENDPOINT, Format, Model, TranslateError, resolve_language};

/// Environment variable read for the fallback API key when none is configured.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default settings in the `[defaults]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Default source language (code or name).
    pub from: Option<String>,
    /// Default target language (code or name).
    pub to: Option<String>,
    /// Default input format (`csv` or `json`).
    pub format: Option<String>,
    /// Default model identifier.
    pub model: Option<String>,
}

/// Remote API settings in the `[api]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Seconds without a response chunk before a stream is abandoned.
    #[serde(default)]
    pub idle_timeout_secs: Option<u64>,
}

impl ApiConfig {
    /// Gets the process-wide fallback key, preferring the environment over
    /// the config file.
    pub fn get_api_key(&self) -> Option<String> {
        let env_var = self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV);
        if let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/adapt-tl/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// Resolved configuration after merging CLI arguments and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Source language label handed to the prompt builder.
    pub source_language: String,
    /// Target language label handed to the prompt builder.
    pub target_language: String,
    pub format: Format,
    pub model: Model,
    pub endpoint: String,
    /// Process-wide fallback credential.
    pub fallback_api_key: Option<String>,
    pub idle_timeout: Option<Duration>,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub from: Option<String>,
    pub to: Option<String>,
    pub format: Option<String>,
    /// Input file path, used to infer the format when none is given.
    pub file: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub idle_timeout_secs: Option<u64>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default.
///
/// # Errors
///
/// Returns an error if a language is missing or unknown, or if the format or
/// model is unsupported. Format and model failures carry a
/// [`TranslateError`] so callers can map them to an exit code.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let defaults = &config_file.defaults;

    let from = options
        .from
        .as_ref()
        .or(defaults.from.as_ref())
        .ok_or_else(|| missing("from", "source language", "--from <lang>"))?;
    let source_language = resolve_language(from)?.to_string();

    let to = options
        .to
        .as_ref()
        .or(defaults.to.as_ref())
        .ok_or_else(|| missing("to", "target language", "--to <lang>"))?;
    let target_language = resolve_language(to)?.to_string();

    let format = match options.format.as_ref().or(defaults.format.as_ref()) {
        Some(format) => format.parse::<Format>()?,
        None => options
            .file
            .as_deref()
            .and_then(Format::from_path)
            .ok_or_else(|| missing("format", "input format", "--format <csv|json>"))?,
    };

    let model = match options.model.as_ref().or(defaults.model.as_ref()) {
        Some(model) => model.parse::<Model>()?,
        None => Model::default(),
    };

    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.api.endpoint.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    let idle_timeout = options
        .idle_timeout_secs
        .or(config_file.api.idle_timeout_secs)
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs);

    Ok(ResolvedConfig {
        source_language,
        target_language,
        format,
        model,
        endpoint,
        fallback_api_key: config_file.api.get_api_key(),
        idle_timeout,
    })
}

fn missing(key: &str, what: &str, flag: &str) -> anyhow::Error {
    anyhow::anyhow!(
        "Missing required configuration: '{key}' ({what})\n\n\
         Please provide it via:\n  \
         - CLI option: adapt-tl {flag}\n  \
         - Config file: ~/.config/adapt-tl/config.toml"
    )
}

/// Returns the pipeline error behind a configuration failure, if any.
pub fn as_translate_error(err: &anyhow::Error) -> Option<&TranslateError> {
    err.downcast_ref::<TranslateError>()
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/adapt-tl/config.toml`
    /// or `~/.config/adapt-tl/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Self {
        Self {
            config_path: paths::config_dir().join("config.toml"),
        }
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    /// Loads the config file, treating a missing file as empty.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
