//! Global output configuration and logging macros.
//!
//! ## Design Principles
//!
//! - Tutor replies go to stdout
//! - Status messages, progress, and logs go to stderr
//! - Errors always go to stderr
//! - Quiet mode suppresses non-essential output
//! - Verbose mode adds diagnostic detail (`debug!`)
//! - Colors can be disabled via flag or NO_COLOR environment variable

use std::io::{self, Write};
use std::sync::OnceLock;

/// Global output configuration.
static OUTPUT_CONFIG: OnceLock<OutputConfig> = OnceLock::new();

/// Output configuration settings.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Print diagnostic messages.
    pub verbose: bool,
    /// Disable colored output.
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quiet: false,
            verbose: false,
            // https://no-color.org/
            no_color: std::env::var("NO_COLOR").is_ok(),
        }
    }
}

/// Initialize the global output configuration.
///
/// This should be called once at startup with the CLI flags.
/// If called multiple times, subsequent calls are ignored.
pub fn init(config: OutputConfig) {
    let _ = OUTPUT_CONFIG.set(config);
}

/// Get the current output configuration.
pub fn config() -> &'static OutputConfig {
    OUTPUT_CONFIG.get_or_init(OutputConfig::default)
}

/// Check if quiet mode is enabled.
pub fn is_quiet() -> bool {
    config().quiet
}

/// Check if verbose mode is enabled. Quiet wins over verbose.
pub fn is_verbose() -> bool {
    let config = config();
    config.verbose && !config.quiet
}

/// Check if colors are disabled.
pub fn is_no_color() -> bool {
    config().no_color
}

/// Print a status message to stderr (respects quiet mode).
#[macro_export]
macro_rules! status {
    ($($arg:tt)*) => {
        if !$crate::output::is_quiet() {
            eprintln!($($arg)*);
        }
    };
}

/// Print a diagnostic message to stderr (only with `--verbose`).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::output::is_verbose() {
            eprintln!("{} {}", $crate::ui::Style::secondary("debug:"), format_args!($($arg)*));
        }
    };
}

/// Flush stdout after streaming a fragment.
pub fn flush_stdout() {
    let _ = io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert!(!config.quiet);
        assert!(!config.verbose);
    }

    #[test]
    fn test_verbose_defaults_off() {
        // Nothing in the test binary initializes the global config.
        assert!(!is_verbose());
    }
}
