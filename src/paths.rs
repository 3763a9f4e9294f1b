//! XDG-style path utilities for the configuration directory.
//!
//! Paths follow XDG Base Directory conventions on every platform rather than
//! OS-specific locations, so the config file is easy to find and share.

use std::path::PathBuf;

/// Directory name used under the XDG base directories.
const APP_DIR: &str = "adapt-tl";

/// Returns the configuration directory for adapt-tl.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/adapt-tl` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/adapt-tl` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join(APP_DIR),
        |xdg| PathBuf::from(xdg).join(APP_DIR),
    )
}

#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
