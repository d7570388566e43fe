use crate::error::{FormError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "formkit.json";
const DEFAULT_MISSING_CLASS_INDICATOR: &str = "unstyled";
const CLASS_KEY_PREFIX: &str = "class.";

/// Rendering configuration, stored in `formkit.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderConfig {
    /// Role → CSS classes, overriding the default theme.
    #[serde(default)]
    pub classes: BTreeMap<String, String>,

    /// Prefix used for roles the theme does not define.
    #[serde(default = "default_missing_class_indicator")]
    pub missing_class_indicator: String,

    /// Whether field hints are rendered.
    #[serde(default = "default_show_hints")]
    pub show_hints: bool,
}

fn default_missing_class_indicator() -> String {
    DEFAULT_MISSING_CLASS_INDICATOR.to_string()
}

fn default_show_hints() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            classes: BTreeMap::new(),
            missing_class_indicator: default_missing_class_indicator(),
            show_hints: default_show_hints(),
        }
    }
}

impl RenderConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: RenderConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, content)?;
        Ok(())
    }

    /// Reads a setting: `show-hints`, `missing-class-indicator` or `class.<role>`.
    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "show-hints" => Ok(self.show_hints.to_string()),
            "missing-class-indicator" => Ok(self.missing_class_indicator.clone()),
            _ => match key.strip_prefix(CLASS_KEY_PREFIX) {
                Some(role) => Ok(self.classes.get(role).cloned().unwrap_or_default()),
                None => Err(unknown_key(key)),
            },
        }
    }

    /// Updates a setting. Keys as in [`RenderConfig::get`].
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "show-hints" => {
                self.show_hints = value.parse().map_err(|_| {
                    FormError::Config(format!("show-hints expects true or false, got {}", value))
                })?;
            }
            "missing-class-indicator" => self.missing_class_indicator = value.to_string(),
            _ => match key.strip_prefix(CLASS_KEY_PREFIX) {
                Some(role) if !role.is_empty() => {
                    self.classes.insert(role.to_string(), value.to_string());
                }
                _ => return Err(unknown_key(key)),
            },
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> FormError {
    FormError::Config(format!("Unknown config key: {}", key))
}
