use std::sync::Arc;

use super::prompt::build_system_instruction;
use super::provider::{ChatProvider, ChatSession, SessionRequest};
use crate::error::{Result, TutorError};

/// Opens one tutor session per selected language.
pub struct SessionManager {
    provider: Arc<dyn ChatProvider>,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
}

impl SessionManager {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        api_key: Option<String>,
        api_key_env: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            api_key,
            api_key_env: api_key_env.into(),
            model: model.into(),
        }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Creates a session whose system instruction tutors `language`.
    ///
    /// Fails with `Configuration` when no API key is available and with
    /// `Provider` when the backend refuses the session. Never retries.
    pub async fn create_session(&self, language: &str) -> Result<Box<dyn ChatSession>> {
        let api_key = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TutorError::Configuration(format!(
                    "{} environment variable not set.",
                    self.api_key_env
                ))
            })?;

        let request = SessionRequest {
            api_key: api_key.to_string(),
            model: self.model.clone(),
            system_instruction: build_system_instruction(language),
        };

        crate::debug!(
            "opening {} session for {language} with model {}",
            self.provider.name(),
            self.model
        );
        self.provider.open_session(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::tutor::scripted::ScriptedProvider;

    fn manager(provider: &ScriptedProvider, api_key: Option<&str>) -> SessionManager {
        SessionManager::new(
            Arc::new(provider.clone()),
            api_key.map(ToString::to_string),
            "API_KEY",
            "gemini-2.5-flash",
        )
    }

    #[tokio::test]
    async fn test_create_session_builds_instruction() {
        let provider = ScriptedProvider::new();
        let manager = manager(&provider, Some("secret"));

        assert!(manager.create_session("German").await.is_ok());

        let opened = provider.opened_sessions().await;
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].api_key, "secret");
        assert_eq!(opened[0].model, "gemini-2.5-flash");
        assert_eq!(opened[0].system_instruction, build_system_instruction("German"));
    }

    #[tokio::test]
    async fn test_missing_api_key_is_configuration_error() {
        let provider = ScriptedProvider::new();

        for key in [None, Some(""), Some("   ")] {
            let Err(err) = manager(&provider, key).create_session("German").await else {
                panic!("expected an error");
            };
            assert_eq!(
                err,
                TutorError::Configuration("API_KEY environment variable not set.".to_string())
            );
        }
        assert!(provider.opened_sessions().await.is_empty());
    }

    #[tokio::test]
    async fn test_provider_refusal_is_provider_error() {
        let provider = ScriptedProvider::failing_to_open("quota exceeded");

        let Err(err) = manager(&provider, Some("secret")).create_session("Italian").await else {
            panic!("expected an error");
        };
        assert_eq!(err, TutorError::Provider("quota exceeded".to_string()));
    }
}
