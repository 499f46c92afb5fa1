use std::path::PathBuf;

use anyhow::{Context, Result};
use istilam_core::TomlFileStore;

/// Settings file: `--config` if given, else `<user config dir>/settings.toml`.
pub fn settings_store(config: Option<PathBuf>) -> Result<TomlFileStore> {
    let path = match config {
        Some(path) => path,
        None => directories::ProjectDirs::from("com", "istilam", "Istilam")
            .context("could not determine the user config directory")?
            .config_dir()
            .join("settings.toml"),
    };
    Ok(TomlFileStore::new(path))
}
