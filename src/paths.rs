//! XDG-style path utilities for the configuration directory.
//!
//! XDG Base Directory conventions are preferred over OS-specific
//! locations so the config file lives in the same place on macOS and Linux.

use std::path::PathBuf;

use crate::error::{Result, TutorError};

const APP_DIR: &str = "lingua-buddy";

/// Returns the configuration directory for lingua-buddy.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/lingua-buddy` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/lingua-buddy` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().ok_or_else(|| {
        TutorError::configuration("Failed to determine home directory; set XDG_CONFIG_HOME")
    })?;
    Ok(home.join(".config").join(APP_DIR))
}
