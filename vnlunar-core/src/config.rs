//! User configuration.
//!
//! Settings are layered: built-in defaults, then `~/.config/vnlunar/config.toml`
//! (or an explicit file), then `VNLUNAR_*` environment variables. Command-line
//! flags are applied on top by the CLI.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_OUTPUT_PATH, DEFAULT_TIMEZONE, DEFAULT_YEARS_AHEAD};
use crate::error::{LunarError, LunarResult};
use crate::generator::GeneratorConfig;

const ENV_PREFIX: &str = "VNLUNAR";

fn default_years() -> u32 {
    DEFAULT_YEARS_AHEAD
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Number of years to generate, starting at `start_year`
    #[serde(default = "default_years")]
    pub years: u32,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Custom event list; empty means the default holiday catalog
    #[serde(default)]
    pub events: String,

    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// First year to generate; the current year when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            years: default_years(),
            output: default_output(),
            events: String::new(),
            timezone: default_timezone(),
            start_year: None,
        }
    }
}

impl Settings {
    pub fn config_path() -> LunarResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| LunarError::Config("Could not determine config directory".into()))?
            .join("vnlunar");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default config path. A missing file is not an error.
    pub fn load() -> LunarResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path` plus the environment. A missing file is not an error.
    pub fn load_from(path: &Path) -> LunarResult<Self> {
        Self::load_layered(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: &Path, environment: Environment) -> LunarResult<Self> {
        let settings: Settings = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| LunarError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| LunarError::Config(e.to_string()))?;

        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }

    /// Output path with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.output.to_string_lossy()).into_owned())
    }

    /// Generator configuration, using `current_year` when no start year is set.
    pub fn generator_config(&self, current_year: i32) -> GeneratorConfig {
        GeneratorConfig::new(
            self.start_year.unwrap_or(current_year),
            self.years,
            self.timezone.clone(),
        )
    }

    pub fn to_toml(&self) -> LunarResult<String> {
        toml::to_string_pretty(self).map_err(|e| LunarError::Config(e.to_string()))
    }

    /// Create a config file with all options commented out.
    pub fn create_default_config(path: &Path) -> LunarResult<()> {
        let contents = format!(
            "\
# vnlunar configuration

# Number of years to generate:
# years = {DEFAULT_YEARS_AHEAD}

# First year to generate (defaults to the current year):
# start_year = 2026

# Where to write the calendar:
# output = \"{DEFAULT_OUTPUT_PATH}\"

# Timezone used to decide which day a new moon falls on:
# timezone = \"{DEFAULT_TIMEZONE}\"

# Custom lunar events instead of the holiday catalog,
# day/month:title (every year) or day/month/year:title (one year):
# events = \"15/8:My Birthday,4/5/2030:One-off Trip\"
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                LunarError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| LunarError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
