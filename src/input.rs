//! JSON descriptions of VOD segment lists and variant sets.

use anyhow::{Context, Result};
use hlsforged_playlist::{Segment, Variant};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Load a JSON array of segments.
pub fn load_segments(path: &Path) -> Result<Vec<Segment>> {
    let segments: Vec<Segment> = load_json(path)?;
    if let Some(bad) = segments.iter().find(|s| s.duration < 0.0) {
        anyhow::bail!("Segment {} has invalid duration {}", bad.uri, bad.duration);
    }
    Ok(segments)
}

/// Load a JSON array of variants.
pub fn load_variants(path: &Path) -> Result<Vec<Variant>> {
    load_json(path)
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse input file: {:?}", path))
}
