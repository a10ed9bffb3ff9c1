//! # lingua - Conversation practice with an AI tutor
//!
//! `lingua` opens a chat with a hosted model primed as a friendly language
//! tutor. Pick a language, the tutor greets you, and every reply streams into
//! the terminal as it is generated.
//!
//! ## Quick Start
//!
//! ```bash
//! export API_KEY="your-gemini-key"
//!
//! # Practice the default language (Spanish)
//! lingua
//!
//! # Practice Japanese with a specific model
//! lingua --language ja --model gemini-2.5-pro
//!
//! # List languages
//! lingua languages
//! ```
//!
//! ## Configuration
//!
//! Defaults are read from `~/.config/lingua-buddy/config.toml`:
//!
//! ```toml
//! [lingua]
//! language = "French"
//! model = "gemini-2.5-flash"
//!
//! [provider]
//! api_key_env = "GEMINI_API_KEY"
//! ```

/// Interactive tutor chat: transcript, conversation driver, REPL.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and resolution.
pub mod config;

/// Error taxonomy.
pub mod error;

/// File system utilities.
pub mod fs;

/// Global output configuration (quiet, verbose, colors) and logging macros.
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Tutor backend: languages, system instruction, providers and sessions.
pub mod tutor;

/// Terminal UI components (spinner, colors).
pub mod ui;
