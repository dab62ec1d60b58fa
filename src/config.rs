//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <path>` or `$XDG_CONFIG_HOME/hiertable/hiertable.toml`
//! 3. Environment variables: `HIERTABLE_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{DisplayOptions, GroupPolicy};

/// Unified configuration for hiertable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Attribute keys tried in order for a row title
    pub title_keys: Vec<String>,
    /// Title when no title key holds a value
    pub placeholder_title: String,
    /// Cell text for attribute values that print as nothing
    pub empty_value: String,
    /// Spaces per depth level in the item column
    pub indent: usize,
    /// Reject malformed child groups instead of skipping them
    pub strict_groups: bool,
    /// Colored output (NO_COLOR still wins)
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let display = DisplayOptions::default();
        Self {
            title_keys: display.title_keys,
            placeholder_title: display.placeholder_title,
            empty_value: display.empty_value,
            indent: 2,
            strict_groups: false,
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub title_keys: Option<Vec<String>>,
    pub placeholder_title: Option<String>,
    pub empty_value: Option<String>,
    pub indent: Option<usize>,
    pub strict_groups: Option<bool>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for hiertable.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "hiertable").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("hiertable.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value. Lists are replaced, not merged.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            title_keys: overlay
                .title_keys
                .clone()
                .unwrap_or_else(|| self.title_keys.clone()),
            placeholder_title: overlay
                .placeholder_title
                .clone()
                .unwrap_or_else(|| self.placeholder_title.clone()),
            empty_value: overlay
                .empty_value
                .clone()
                .unwrap_or_else(|| self.empty_value.clone()),
            indent: overlay.indent.unwrap_or(self.indent),
            strict_groups: overlay.strict_groups.unwrap_or(self.strict_groups),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_path` - Explicit config file; must exist when given.
    ///   Without it the global XDG file is used if present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply HIERTABLE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let builder = Config::builder().add_source(
            Environment::with_prefix("HIERTABLE")
                .prefix_separator("_")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("title_keys")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;

        if let Ok(val) = config.get::<Vec<String>>("title_keys") {
            settings.title_keys = val;
        }
        if let Ok(val) = config.get_string("placeholder_title") {
            settings.placeholder_title = val;
        }
        if let Ok(val) = config.get_string("empty_value") {
            settings.empty_value = val;
        }
        if let Ok(val) = config.get_int("indent") {
            settings.indent = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("HIERTABLE_INDENT must not be negative: {val}"),
            })?;
        }
        if let Ok(val) = config.get_bool("strict_groups") {
            settings.strict_groups = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            title_keys: self.title_keys.clone(),
            placeholder_title: self.placeholder_title.clone(),
            empty_value: self.empty_value.clone(),
        }
    }

    pub fn group_policy(&self) -> GroupPolicy {
        if self.strict_groups {
            GroupPolicy::Strict
        } else {
            GroupPolicy::Lenient
        }
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# hiertable configuration
#
# Locations (by precedence, lowest to highest):
#   File: ~/.config/hiertable/hiertable.toml  (or --config <path>)
#   Env:  HIERTABLE_* environment variables, e.g. HIERTABLE_TITLE_KEYS=Name,ID
#   CLI:  --strict, --no-color

# Attribute keys tried in order for the row title
# title_keys = ["Name", "ID"]

# Title shown when none of the keys holds a value
# placeholder_title = "(no name)"

# Cell text for attribute values that print as nothing (empty strings)
# empty_value = "—"

# Spaces per depth level
# indent = 2

# Fail on malformed child groups instead of skipping them
# strict_groups = false

# Colored output (NO_COLOR is respected regardless)
# color = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_default_settings_when_created_then_matches_display_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.display_options(), DisplayOptions::default());
        assert_eq!(settings.indent, 2);
        assert_eq!(settings.group_policy(), GroupPolicy::Lenient);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_fields() {
        let base = Settings::default();
        let overlay = RawSettings {
            title_keys: Some(vec!["Title".to_string()]),
            strict_groups: Some(true),
            ..RawSettings::default()
        };

        let merged = base.merge_with(&overlay);

        assert_eq!(merged.title_keys, vec!["Title".to_string()]);
        assert!(merged.strict_groups);
        assert_eq!(merged.placeholder_title, "(no name)");
        assert_eq!(merged.indent, 2);
    }

    #[test]
    fn given_settings_when_serializing_then_template_keys_parse_back() {
        let toml_text = Settings::default().to_toml().unwrap();
        let parsed: Settings = toml::from_str(&toml_text).unwrap();
        assert_eq!(parsed, Settings::default());
        assert!(toml::from_str::<RawSettings>(&Settings::template()).is_ok());
    }
}
