#![allow(clippy::unwrap_used)]
//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file settings
//! 3. Built-in defaults (model, endpoint) or inference from the file name (format)

use adapt_tl::config::{
    ApiConfig, ConfigFile, DefaultsConfig, ResolveOptions, as_translate_error, resolve_config,
};
use adapt_tl::translation::{DEFAULT_ENDPOINT, Format, Model, TranslateError};
use std::time::Duration;

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        defaults: DefaultsConfig {
            from: Some("English".to_string()),
            to: Some("fr".to_string()),
            format: Some("json".to_string()),
            model: Some("gpt-4".to_string()),
        },
        api: ApiConfig {
            endpoint: Some("http://config.local".to_string()),
            api_key: Some("config-key".to_string()),
            api_key_env: Some("ADAPT_TL_PRIORITY_TEST_UNSET".to_string()),
            idle_timeout_secs: Some(45),
        },
    }
}

#[test]
fn test_config_file_values_used_without_cli_options() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.source_language, "English");
    assert_eq!(resolved.target_language, "French");
    assert_eq!(resolved.format, Format::Json);
    assert_eq!(resolved.model, Model::Gpt4);
    assert_eq!(resolved.endpoint, "http://config.local");
    assert_eq!(resolved.fallback_api_key, Some("config-key".to_string()));
    assert_eq!(resolved.idle_timeout, Some(Duration::from_secs(45)));
}

#[test]
fn test_cli_options_override_config_file() {
    let options = ResolveOptions {
        from: Some("de".to_string()),
        to: Some("Italian".to_string()),
        format: Some("csv".to_string()),
        model: Some("gpt-3.5-turbo".to_string()),
        endpoint: Some("http://cli.local".to_string()),
        idle_timeout_secs: Some(5),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.source_language, "German");
    assert_eq!(resolved.target_language, "Italian");
    assert_eq!(resolved.format, Format::Csv);
    assert_eq!(resolved.model, Model::Gpt35Turbo);
    assert_eq!(resolved.endpoint, "http://cli.local");
    assert_eq!(resolved.idle_timeout, Some(Duration::from_secs(5)));
}

#[test]
fn test_config_format_beats_file_extension() {
    let options = ResolveOptions {
        file: Some("course.csv".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.format, Format::Json);
}

#[test]
fn test_file_extension_used_when_format_unset() {
    let mut config = make_config_with_defaults();
    config.defaults.format = None;
    let options = ResolveOptions {
        file: Some("exports/course.csv".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &config).unwrap();

    assert_eq!(resolved.format, Format::Csv);
}

#[test]
fn test_builtin_defaults_fill_gaps() {
    let config = ConfigFile {
        defaults: DefaultsConfig {
            from: Some("en".to_string()),
            to: Some("es".to_string()),
            format: Some("csv".to_string()),
            model: None,
        },
        api: ApiConfig::default(),
    };

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

    assert_eq!(resolved.model, Model::Gpt35Turbo);
    assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(resolved.idle_timeout, None);
}

#[test]
fn test_invalid_cli_format_overrides_valid_config_format() {
    let options = ResolveOptions {
        format: Some("yaml".to_string()),
        ..ResolveOptions::default()
    };

    let err = resolve_config(&options, &make_config_with_defaults()).unwrap_err();

    assert!(matches!(
        as_translate_error(&err),
        Some(TranslateError::UnsupportedFormat(f)) if f == "yaml"
    ));
}
