pub mod persist;
mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./hlsforged.toml",
        "~/.config/hlsforged/config.toml",
        "/etc/hlsforged/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("Using config file {:?}", path);
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.playlist.window_size == 0 {
        anyhow::bail!("playlist.window_size must be at least 1");
    }

    if let Some(ref key) = config.playlist.encryption {
        if key.method.is_empty() {
            anyhow::bail!("playlist.encryption.method cannot be empty");
        }
        if key.uri.is_empty() {
            anyhow::bail!("playlist.encryption.uri cannot be empty");
        }
    }

    if let Some(ref wv) = config.playlist.widevine {
        if wv.cypher_version.is_empty() && wv.ecm.is_empty() {
            tracing::warn!("playlist.widevine is set but both fields are empty; no lines will be emitted");
        }
    }

    if config.publisher.render_interval_ms == 0 {
        anyhow::bail!("publisher.render_interval_ms cannot be 0");
    }

    if config.publisher.revision_buffer == 0 {
        anyhow::bail!("publisher.revision_buffer cannot be 0");
    }

    Ok(())
}
