use crate::core::config::{AppConfig, DEFAULT_API_BASE_URL};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const EXAMPLE_CONFIG: &str = include_str!("../../docs/example_config.yaml");

/// The example configuration, pointed at `api_url` when one is given.
pub fn render_config(api_url: Option<&str>) -> Result<String> {
    let Some(api_url) = api_url else {
        return Ok(EXAMPLE_CONFIG.to_string());
    };
    let api_url = api_url.trim().trim_end_matches('/');
    if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
        anyhow::bail!("API URL must start with http:// or https://, got '{api_url}'");
    }
    Ok(EXAMPLE_CONFIG.replace(DEFAULT_API_BASE_URL, api_url))
}

/// Writes a new configuration file and returns where it went. Existing files
/// are never overwritten.
pub fn setup(config_path: Option<&str>, api_url: Option<&str>) -> Result<PathBuf> {
    let path = match config_path {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    let contents = render_config(api_url)?;
    write_new_file(&path, &contents)?;

    tracing::info!("Created default configuration at {}", path.display());
    println!("Configuration written to {}", path.display());
    Ok(path)
}

fn write_new_file(path: &Path, contents: &str) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("Failed to write config file to {}", path.display()))
}
