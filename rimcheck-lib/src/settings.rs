//! Settings resolution for the checker.
//!
//! Every value is resolved through the same priority chain:
//! CLI override > environment variable > config file > built-in default.
//! The collection id has no sensible default and must come from one of the
//! first three sources.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::CheckError;

/// RimWorld's Steam app id, which names the workshop content directory.
const RIMWORLD_APP_ID: &str = "294100";

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub mods_config_path: PathBuf,
    pub workshop_dir: PathBuf,
    pub collection_id: String,
}

/// Values supplied on the command line, overriding everything else.
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub mods_config_path: Option<PathBuf>,
    pub workshop_dir: Option<PathBuf>,
    pub collection_id: Option<String>,
}

/// TOML config file format.
#[derive(Debug, Deserialize)]
struct ConfigFile {
    rimcheck: Option<RimcheckConfig>,
}

#[derive(Debug, Deserialize)]
struct RimcheckConfig {
    mods_config: Option<PathBuf>,
    workshop_dir: Option<PathBuf>,
    collection: Option<String>,
}

/// Return the path to the default config file: `~/.config/rimcheck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("rimcheck").join("config.toml"))
}

impl Settings {
    /// Resolve settings from overrides, environment, and the default config file.
    pub fn load(overrides: SettingsOverrides) -> Result<Self, CheckError> {
        Self::load_from(overrides, config_path().as_deref())
    }

    /// Resolve settings using an explicit config file path (or none).
    pub fn load_from(
        overrides: SettingsOverrides,
        config_file: Option<&Path>,
    ) -> Result<Self, CheckError> {
        let config = config_file.and_then(load_config_file);

        let mods_config_path = overrides
            .mods_config_path
            .or_else(|| std::env::var_os("RIMCHECK_MODS_CONFIG").map(PathBuf::from))
            .or_else(|| config.as_ref().and_then(|c| c.mods_config.clone()))
            .or_else(default_mods_config_path)
            .ok_or_else(|| {
                CheckError::settings(
                    "Missing ModsConfig.xml path. Pass --mods-config or set RIMCHECK_MODS_CONFIG",
                )
            })?;

        let workshop_dir = overrides
            .workshop_dir
            .or_else(|| std::env::var_os("RIMCHECK_WORKSHOP_DIR").map(PathBuf::from))
            .or_else(|| config.as_ref().and_then(|c| c.workshop_dir.clone()))
            .or_else(default_workshop_dir)
            .ok_or_else(|| {
                CheckError::settings(
                    "Missing workshop directory. Pass --workshop-dir or set RIMCHECK_WORKSHOP_DIR",
                )
            })?;

        let collection_id = overrides
            .collection_id
            .or_else(|| std::env::var("RIMCHECK_COLLECTION").ok())
            .or_else(|| config.as_ref().and_then(|c| c.collection.clone()))
            .ok_or_else(|| {
                CheckError::settings(
                    "Missing collection id. Pass --collection, set RIMCHECK_COLLECTION, \
                     or add `collection` to the config file",
                )
            })?;

        if collection_id.is_empty() || !collection_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(CheckError::settings(format!(
                "Collection id must be numeric, got '{collection_id}'"
            )));
        }

        Ok(Self {
            mods_config_path,
            workshop_dir,
            collection_id,
        })
    }
}

/// Default ModsConfig.xml location for a Steam install on Linux.
fn default_mods_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| {
        h.join(".config")
            .join("unity3d")
            .join("Ludeon Studios")
            .join("RimWorld by Ludeon Studios")
            .join("Config")
            .join("ModsConfig.xml")
    })
}

/// Default workshop content directory for a Steam install on Linux.
fn default_workshop_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| {
        h.join(".local")
            .join("share")
            .join("Steam")
            .join("steamapps")
            .join("workshop")
            .join("content")
            .join(RIMWORLD_APP_ID)
    })
}

fn load_config_file(path: &Path) -> Option<RimcheckConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    let config: ConfigFile = toml::from_str(&content).ok()?;
    config.rimcheck
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overrides(collection: Option<&str>) -> SettingsOverrides {
        SettingsOverrides {
            mods_config_path: Some(PathBuf::from("/tmp/ModsConfig.xml")),
            workshop_dir: Some(PathBuf::from("/tmp/workshop")),
            collection_id: collection.map(str::to_string),
        }
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::load_from(overrides(Some("12345")), None).unwrap();
        assert_eq!(settings.mods_config_path, PathBuf::from("/tmp/ModsConfig.xml"));
        assert_eq!(settings.workshop_dir, PathBuf::from("/tmp/workshop"));
        assert_eq!(settings.collection_id, "12345");
    }

    #[test]
    fn test_collection_from_config_file() {
        let path = std::env::temp_dir().join(format!("rimcheck-cfg-{}.toml", std::process::id()));
        std::fs::write(&path, "[rimcheck]\ncollection = \"99887\"\n").unwrap();

        let settings = Settings::load_from(overrides(None), Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.collection_id, "99887");
    }

    #[test]
    fn test_non_numeric_collection_rejected() {
        let result = Settings::load_from(overrides(Some("not-a-number")), None);
        assert!(matches!(result, Err(CheckError::Settings(_))));
    }
}
