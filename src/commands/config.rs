use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use vnlunar_core::config::Settings;

fn resolve_path(config_path: Option<&Path>) -> Result<PathBuf> {
    match config_path {
        Some(path) => Ok(path.to_path_buf()),
        None => Settings::config_path().context("Failed to locate config directory"),
    }
}

pub fn init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = resolve_path(config_path)?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}\n\
            Use --force to overwrite it",
            path.display()
        );
    }

    Settings::create_default_config(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    println!("{} Created {}", "✓".green(), path.display());
    Ok(())
}

pub fn show(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_path(config_path)?;
    let settings = super::load_settings(config_path)?;

    let status = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("{}", "Paths".bold());
    println!("  Config:  {}{}", path.display(), status.dimmed());
    println!();
    println!("{}", "Settings".bold());
    print!("{}", settings.to_toml().context("Failed to render settings")?);

    Ok(())
}
