//! Config priority contract tests.
//!
//! Priority order (highest to lowest):
//! 1. CLI arguments
//! 2. Config file
//! 3. Built-in defaults

use lingua_buddy::config::{
    ConfigFile, DEFAULT_ENDPOINT, DEFAULT_MODEL, LinguaConfig, ProviderConfig, ResolveOptions,
    resolve_config,
};
use lingua_buddy::error::TutorError;

fn make_config_with_defaults() -> ConfigFile {
    ConfigFile {
        lingua: LinguaConfig {
            language: Some("German".to_string()),
            model: Some("config_model".to_string()),
        },
        provider: ProviderConfig {
            endpoint: Some("http://config.local".to_string()),
            api_key: Some("file_key".to_string()),
            api_key_env: Some("LINGUA_PRIORITY_TEST_UNSET".to_string()),
        },
    }
}

#[test]
fn test_config_file_used_when_cli_not_specified() {
    let resolved = resolve_config(&ResolveOptions::default(), &make_config_with_defaults()).unwrap();

    assert_eq!(resolved.language, "German");
    assert_eq!(resolved.model, "config_model");
    assert_eq!(resolved.endpoint, "http://config.local");
    assert_eq!(resolved.api_key.as_deref(), Some("file_key"));
}

#[test]
fn test_cli_language_overrides_config_language() {
    let options = ResolveOptions {
        language: Some("Portuguese".to_string()),
        ..ResolveOptions::default()
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.language, "Portuguese");
}

#[test]
fn test_cli_model_and_endpoint_override_config() {
    let options = ResolveOptions {
        language: None,
        model: Some("cli_model".to_string()),
        endpoint: Some("http://cli.local".to_string()),
    };

    let resolved = resolve_config(&options, &make_config_with_defaults()).unwrap();
    assert_eq!(resolved.model, "cli_model");
    assert_eq!(resolved.endpoint, "http://cli.local");
}

#[test]
fn test_builtin_defaults_when_nothing_configured() {
    let config = ConfigFile {
        provider: ProviderConfig {
            api_key_env: Some("LINGUA_PRIORITY_TEST_UNSET".to_string()),
            ..ProviderConfig::default()
        },
        ..ConfigFile::default()
    };

    let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
    assert_eq!(resolved.language, "Spanish");
    assert_eq!(resolved.model, DEFAULT_MODEL);
    assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(resolved.api_key, None);
}

#[test]
fn test_invalid_cli_language_returns_error() {
    let options = ResolveOptions {
        language: Some("Sindarin".to_string()),
        ..ResolveOptions::default()
    };

    let result = resolve_config(&options, &make_config_with_defaults());
    assert_eq!(
        result.unwrap_err(),
        TutorError::UnsupportedLanguage("Sindarin".to_string())
    );
}
