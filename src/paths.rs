//! XDG-style path utilities for configuration and stored state.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! so the layout is the same on every platform.

use std::path::PathBuf;

const APP_DIR: &str = "aitr";

/// Returns the configuration directory.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/aitr` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/aitr` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    xdg_dir("XDG_CONFIG_HOME", ".config")
}

/// Returns the directory holding the state database.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/aitr` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/aitr` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    xdg_dir("XDG_DATA_HOME", ".local/share")
}

fn xdg_dir(env_var: &str, home_relative: &str) -> PathBuf {
    std::env::var(env_var)
        .ok()
        .filter(|v| !v.is_empty())
        .map_or_else(
            || home_dir().join(home_relative).join(APP_DIR),
            |xdg| PathBuf::from(xdg).join(APP_DIR),
        )
}

/// Returns the user's home directory.
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
