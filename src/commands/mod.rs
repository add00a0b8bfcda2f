pub mod config;
pub mod convert;
pub mod generate;

use std::path::Path;

use anyhow::{Context, Result};
use vnlunar_core::config::Settings;

/// Load layered settings from `path`, or from the default config location.
///
/// An explicit path must exist; the default one is optional.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let settings = match path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Settings::load_from(path)
        }
        None => Settings::load(),
    };

    settings.context("Failed to load configuration")
}
