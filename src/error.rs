//! Error taxonomy for tutor sessions.

use thiserror::Error;

/// Errors raised while configuring or talking to the tutor backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TutorError {
    /// Missing credential or an unusable configuration file.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Session creation, HTTP, transport or stream payload failure.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Language outside the supported list.
    #[error("Unsupported language: '{0}'")]
    UnsupportedLanguage(String),
}

impl TutorError {
    pub fn provider(message: impl Into<String>) -> Self {
        Self::Provider(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

/// Result type alias for tutor operations.
pub type Result<T> = std::result::Result<T, TutorError>;
