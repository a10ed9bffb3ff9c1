//! The tutor backend: languages, system instruction, and chat sessions.

mod gemini;
mod language;
mod prompt;
mod provider;
/// Deterministic provider for tests and offline runs.
pub mod scripted;
mod session_manager;
mod sse_parser;

pub use gemini::{GeminiProvider, GeminiSession};
pub use language::{
    DEFAULT_LANGUAGE, Language, SUPPORTED_LANGUAGES, find_language, print_languages,
    validate_language,
};
pub use prompt::{GREETING_PROBE, SYSTEM_INSTRUCTION_TEMPLATE, build_system_instruction};
pub use provider::{ChatProvider, ChatSession, SessionRequest, TextStream};
pub use session_manager::SessionManager;
