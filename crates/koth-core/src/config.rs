//! Plugin configuration consumed by the capture core

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{KothError, KothResult};

/// Default chest title template, `%loot%` is the loot name
pub const DEFAULT_CHEST_TITLE: &str = "&2Loot: &a%loot%";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KothConfig {
    pub koth: KothSettings,
    pub loot: LootSettings,
    pub hooks: HookSettings,
}

/// Capture settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KothSettings {
    /// Capture type identifier preferred once the plugin is enabled
    pub default_capture_type: String,
}

impl Default for KothSettings {
    fn default() -> Self {
        Self {
            default_capture_type: "player".to_string(),
        }
    }
}

/// Loot settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootSettings {
    /// Master switch for loot commands
    pub cmd_enabled: bool,
    /// Random draw count used when an event reports a loot amount of 0
    pub default_amount: usize,
    /// Loot used when an event does not name one
    pub default_loot: String,
    /// Chest title template
    pub chest_title: String,
}

impl Default for LootSettings {
    fn default() -> Self {
        Self {
            cmd_enabled: true,
            default_amount: 1,
            default_loot: "default".to_string(),
            chest_title: DEFAULT_CHEST_TITLE.to_string(),
        }
    }
}

/// Optional plugin hooks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookSettings {
    /// Register the faction capture type when a factions plugin is present
    pub factions: bool,
}

impl Default for HookSettings {
    fn default() -> Self {
        Self { factions: true }
    }
}

impl KothConfig {
    pub fn from_yaml_str(yaml: &str) -> KothResult<Self> {
        Ok(serde_yml::from_str(yaml)?)
    }

    pub fn from_json_str(json: &str) -> KothResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a `.yml`/`.yaml` or `.json` file
    pub fn load_from_path(path: &Path) -> KothResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        let config = match ext.as_deref() {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&text)?,
            Some("json") => Self::from_json_str(&text)?,
            _ => {
                return Err(KothError::Config(format!(
                    "Unsupported config format: {}",
                    path.display()
                )));
            }
        };

        log::debug!("[Config] Loaded config from {}", path.display());
        Ok(config)
    }
}
