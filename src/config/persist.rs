//! Configuration persistence using toml_edit to preserve formatting and comments.

use anyhow::{Context, Result};
use std::path::Path;
use toml_edit::{DocumentMut, Item};

const SECTIONS: [&str; 2] = ["playlist", "publisher"];

/// Save the config to a TOML file.
///
/// An existing file keeps its comments and any unknown top-level keys; only
/// the `playlist` and `publisher` sections are replaced.
pub fn save_config(path: &Path, config: &super::Config) -> Result<()> {
    let new_content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config")?;
    let new_doc: DocumentMut = new_content
        .parse()
        .with_context(|| "Failed to parse serialized config")?;

    let doc = match std::fs::read_to_string(path) {
        Ok(existing) => {
            let mut doc: DocumentMut = existing
                .parse()
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            for section in SECTIONS {
                match new_doc.get(section) {
                    Some(item) => {
                        let mut item = item.clone();
                        // Keep comments attached to the existing section header.
                        if let (Some(old), Some(new)) = (
                            doc.get(section).and_then(Item::as_table),
                            item.as_table_mut(),
                        ) {
                            *new.decor_mut() = old.decor().clone();
                        }
                        doc[section] = item;
                    }
                    None => {
                        doc.remove(section);
                    }
                }
            }
            doc
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => new_doc,
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {:?}", path))
        }
    };

    std::fs::write(path, doc.to_string())
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config, Config};
    use hlsforged_playlist::Key;
    use tempfile::tempdir;

    #[test]
    fn test_save_new_file_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hlsforged.toml");

        let mut config = Config::default();
        config.playlist.window_size = 8;
        config.playlist.encryption = Some(Key::new("AES-128", "https://keys.example/k"));
        save_config(&path, &config).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.playlist.window_size, 8);
        assert_eq!(loaded.playlist.encryption.unwrap().uri, "https://keys.example/k");
    }

    #[test]
    fn test_save_preserves_comments() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hlsforged.toml");
        std::fs::write(
            &path,
            "# managed by ops\nowner = \"ops\"\n\n# live window\n[playlist]\nwindow_size = 2\n",
        )
        .unwrap();

        let mut config = load_config(&path).unwrap();
        config.playlist.window_size = 5;
        save_config(&path, &config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# managed by ops\nowner = \"ops\""));
        assert!(content.contains("# live window\n[playlist]"));
        assert!(content.contains("window_size = 5"));
        assert!(content.contains("[publisher]"));
    }
}
