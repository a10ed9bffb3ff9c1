//! Command-line interface definitions and handlers.

/// CLI argument parsing with clap.
pub mod args;

/// Subcommand implementations.
pub mod commands;

pub use args::{Args, Command};

use crate::error::TutorError;

/// Maps an error that reached `main` to a process exit code.
pub fn exit_code(error: &anyhow::Error) -> exitcode::ExitCode {
    match error.downcast_ref::<TutorError>() {
        Some(TutorError::Configuration(_)) => exitcode::CONFIG,
        Some(TutorError::UnsupportedLanguage(_)) => exitcode::USAGE,
        Some(TutorError::Provider(_)) => exitcode::UNAVAILABLE,
        None => exitcode::SOFTWARE,
    }
}
