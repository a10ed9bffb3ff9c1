use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Result, TutorError};
use crate::fs::atomic_write;
use crate::paths;
use crate::tutor::{DEFAULT_LANGUAGE, find_language};

/// Model used when neither the CLI nor the config file names one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Public Gemini API endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Environment variable consulted for the API key by default.
pub const DEFAULT_API_KEY_ENV: &str = "API_KEY";

/// Default settings in the `[lingua]` section of config.toml.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinguaConfig {
    /// Language to practice (name or ISO 639-1 code).
    pub language: Option<String>,
    /// Gemini model name.
    pub model: Option<String>,
}

/// The `[provider]` section: where and how to reach the Gemini API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API endpoint base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
}

impl ProviderConfig {
    /// Name of the environment variable holding the API key.
    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Gets the API key, preferring the environment variable over the config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(self.api_key_env())
            && !key.trim().is_empty()
        {
            return Some(key);
        }
        self.api_key.clone().filter(|key| !key.trim().is_empty())
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/lingua-buddy/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub lingua: LinguaConfig,
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Effective settings after merging CLI arguments, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Canonical language name (e.g. "Spanish").
    pub language: String,
    pub model: String,
    pub endpoint: String,
    /// The API key, if one was found. Its absence surfaces when a session is created.
    pub api_key: Option<String>,
    /// Where the API key was looked up, for error messages.
    pub api_key_env: String,
}

/// CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub language: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// Priority: CLI option, then config file, then built-in default.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let requested = options
        .language
        .as_deref()
        .or(config_file.lingua.language.as_deref())
        .unwrap_or(DEFAULT_LANGUAGE);
    let language = find_language(requested)
        .ok_or_else(|| TutorError::UnsupportedLanguage(requested.to_string()))?;

    let model = options
        .model
        .as_ref()
        .or(config_file.lingua.model.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());

    let endpoint = options
        .endpoint
        .as_ref()
        .or(config_file.provider.endpoint.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    Ok(ResolvedConfig {
        language: language.name.to_string(),
        model,
        endpoint,
        api_key: config_file.provider.get_api_key(),
        api_key_env: config_file.provider.api_key_env().to_string(),
    })
}

/// Manages loading and saving the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a config manager for `$XDG_CONFIG_HOME/lingua-buddy/config.toml`
    /// (or `~/.config/lingua-buddy/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager for an explicit file path.
    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Loads the config file. A missing file yields the defaults.
    pub fn load(&self) -> Result<ConfigFile> {
        let contents = match fs::read_to_string(&self.config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigFile::default()),
            Err(e) => {
                return Err(TutorError::configuration(format!(
                    "Failed to read config file {}: {e}",
                    self.config_path.display()
                )));
            }
        };

        toml::from_str(&contents).map_err(|e| {
            TutorError::configuration(format!(
                "Failed to parse config file {}: {e}",
                self.config_path.display()
            ))
        })
    }

    pub fn save(&self, config: &ConfigFile) -> anyhow::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;
        atomic_write(&self.config_path, &contents)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = ConfigFile {
            lingua: LinguaConfig {
                language: Some("Japanese".to_string()),
                model: Some("gemini-2.5-pro".to_string()),
            },
            provider: ProviderConfig {
                endpoint: None,
                api_key: None,
                api_key_env: Some("GEMINI_API_KEY".to_string()),
            },
        };

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("nested/config.toml"));

        manager.save(&ConfigFile::default()).unwrap();

        assert!(manager.config_path().exists());
    }

    #[test]
    fn test_load_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        assert_eq!(manager.load().unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_load_invalid_file_is_configuration_error() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[lingua\nlanguage = ").unwrap();

        let err = manager.load().unwrap_err();
        assert!(matches!(err, TutorError::Configuration(_)));
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[lingua]\nlanguage = \"fr\"\n").unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.lingua.language.as_deref(), Some("fr"));
        assert_eq!(loaded.provider, ProviderConfig::default());
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_from_env() {
        unsafe { std::env::set_var("LINGUA_TEST_API_KEY", "env-key") };

        let provider = ProviderConfig {
            endpoint: None,
            api_key: Some("file-key".to_string()),
            api_key_env: Some("LINGUA_TEST_API_KEY".to_string()),
        };
        assert_eq!(provider.get_api_key(), Some("env-key".to_string()));

        unsafe { std::env::remove_var("LINGUA_TEST_API_KEY") };
    }

    #[test]
    #[serial]
    fn test_provider_get_api_key_fallback_and_blank() {
        unsafe { std::env::set_var("LINGUA_TEST_BLANK_KEY", "  ") };

        let provider = ProviderConfig {
            endpoint: None,
            api_key: Some("file-key".to_string()),
            api_key_env: Some("LINGUA_TEST_BLANK_KEY".to_string()),
        };
        assert_eq!(provider.get_api_key(), Some("file-key".to_string()));

        let provider = ProviderConfig {
            api_key: Some(String::new()),
            ..provider
        };
        assert_eq!(provider.get_api_key(), None);

        unsafe { std::env::remove_var("LINGUA_TEST_BLANK_KEY") };
    }

    // resolve_config tests

    #[test]
    #[serial]
    fn test_resolve_config_defaults() {
        let config = ConfigFile {
            provider: ProviderConfig {
                api_key_env: Some("LINGUA_TEST_UNSET_KEY".to_string()),
                ..ProviderConfig::default()
            },
            ..ConfigFile::default()
        };
        unsafe { std::env::remove_var("LINGUA_TEST_UNSET_KEY") };

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();

        assert_eq!(resolved.language, "Spanish");
        assert_eq!(resolved.model, DEFAULT_MODEL);
        assert_eq!(resolved.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(resolved.api_key, None);
        assert_eq!(resolved.api_key_env, "LINGUA_TEST_UNSET_KEY");
    }

    #[test]
    fn test_resolve_config_normalizes_language_code() {
        let options = ResolveOptions {
            language: Some("ja".to_string()),
            ..ResolveOptions::default()
        };

        let resolved = resolve_config(&options, &ConfigFile::default()).unwrap();
        assert_eq!(resolved.language, "Japanese");
    }

    #[test]
    fn test_resolve_config_rejects_unknown_language() {
        let mut config = ConfigFile::default();
        config.lingua.language = Some("Klingon".to_string());

        let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();
        assert_eq!(err, TutorError::UnsupportedLanguage("Klingon".to_string()));
    }
}
