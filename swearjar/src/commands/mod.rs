// swearjar/src/commands/mod.rs
//! Command implementations for the swearjar CLI.

pub mod check;
pub mod languages;

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;

use swearjar_core::config::{self, SwearjarConfig};

use crate::cli::ConfigArgs;

/// Loads the embedded defaults, then merges the user's configuration file
/// and any extra language packs on top.
pub fn load_config(args: &ConfigArgs) -> Result<SwearjarConfig> {
    let default_config = SwearjarConfig::load_default().context("Failed to load default configuration")?;

    let user_config = match &args.config {
        Some(path) => {
            info!("Merging custom configuration from {}", path.display());
            Some(SwearjarConfig::load_from_file(path)?)
        }
        None => None,
    };
    let mut merged = config::merge_config(default_config, user_config);

    for name_or_path in &args.language_packs {
        let pack = config::load_language_by_name(name_or_path)
            .with_context(|| format!("Failed to load language pack '{}'", name_or_path))?;
        let language = pack_language_name(name_or_path);
        debug!("Registering language pack '{}' ({} terms).", language, pack.profanities.len());
        merged = merged.with_language_pack(&language, pack);
    }

    Ok(merged)
}

/// A pack given by path is registered under its file stem.
fn pack_language_name(name_or_path: &str) -> String {
    Path::new(name_or_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name_or_path)
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_language_name() {
        assert_eq!(pack_language_name("pirate"), "pirate");
        assert_eq!(pack_language_name("/tmp/packs/Pirate.yaml"), "pirate");
    }

    #[test]
    fn test_load_config_defaults() {
        let config = load_config(&ConfigArgs::default()).unwrap();
        assert!(config.languages.contains_key("english"));
    }
}
