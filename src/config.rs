//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treeflat/treeflat.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREEFLAT_*` prefix (`TREEFLAT_RENDER__INDENT_WIDTH` for nested keys)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::ReprojectStrategy;

/// Row rendering settings used by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Spaces of indentation per level
    pub indent_width: usize,
    /// Indicator for an expanded node with children
    pub expanded_glyph: String,
    /// Indicator for a collapsed node with children
    pub collapsed_glyph: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent_width: 2,
            expanded_glyph: "▾".into(),
            collapsed_glyph: "▸".into(),
        }
    }
}

/// Raw render config for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub indent_width: Option<usize>,
    pub expanded_glyph: Option<String>,
    pub collapsed_glyph: Option<String>,
}

impl RenderConfig {
    /// Overlay wins for every field it specifies.
    pub fn merge(&self, overlay: &RawRenderConfig) -> Self {
        Self {
            indent_width: overlay.indent_width.unwrap_or(self.indent_width),
            expanded_glyph: overlay
                .expanded_glyph
                .clone()
                .unwrap_or_else(|| self.expanded_glyph.clone()),
            collapsed_glyph: overlay
                .collapsed_glyph
                .clone()
                .unwrap_or_else(|| self.collapsed_glyph.clone()),
        }
    }
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub default_expanded: Option<bool>,
    pub reproject: Option<ReprojectStrategy>,
    pub default_forest: Option<PathBuf>,
    pub render: RawRenderConfig,
}

/// Unified configuration for treeflat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Initial expansion state for nodes that do not set one
    pub default_expanded: bool,
    /// How rows are refreshed after a toggle
    pub reproject: ReprojectStrategy,
    /// Forest file used when none is given on the command line
    pub default_forest: Option<PathBuf>,
    /// Row rendering
    pub render: RenderConfig,
}

/// Get the XDG config directory for treeflat.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treeflat").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treeflat.toml"))
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

/// Expand `~`, `$VAR` and `${VAR}` in a path string.
pub fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Settings {
    fn expand_paths(&mut self) {
        if let Some(forest) = &self.default_forest {
            self.default_forest = Some(PathBuf::from(expand_path(&forest.to_string_lossy())));
        }
    }

    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            default_expanded: overlay.default_expanded.unwrap_or(self.default_expanded),
            reproject: overlay.reproject.unwrap_or(self.reproject),
            default_forest: overlay
                .default_forest
                .clone()
                .or_else(|| self.default_forest.clone()),
            render: self.render.merge(&overlay.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; must exist if given
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply TREEFLAT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("TREEFLAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("default_expanded") {
            settings.default_expanded = val;
        }
        if let Ok(val) = config.get_string("reproject") {
            settings.reproject = match val.to_lowercase().as_str() {
                "full" => ReprojectStrategy::Full,
                "splice" => ReprojectStrategy::Splice,
                other => {
                    return Err(ApplicationError::Config {
                        message: format!("TREEFLAT_REPROJECT: unknown strategy '{other}'"),
                    })
                }
            };
        }
        if let Ok(val) = config.get_string("default_forest") {
            settings.default_forest = Some(PathBuf::from(val));
        }
        if let Ok(val) = config.get_int("render.indent_width") {
            settings.render.indent_width = usize::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("TREEFLAT_RENDER__INDENT_WIDTH: invalid width {val}"),
            })?;
        }
        if let Ok(val) = config.get_string("render.expanded_glyph") {
            settings.render.expanded_glyph = val;
        }
        if let Ok(val) = config.get_string("render.collapsed_glyph") {
            settings.render.collapsed_glyph = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treeflat configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treeflat/treeflat.toml
#   Explicit: --config <file>
#   Env:    TREEFLAT_* environment variables

# Initial expansion state for nodes without an explicit `expanded`
# default_expanded = false

# Row refresh after a toggle: "full" or "splice"
# reproject = "full"

# Forest file used when none is given
# default_forest = "~/outline.toml"

[render]
# indent_width = 2
# expanded_glyph = "▾"
# collapsed_glyph = "▸"
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
    fn given_defaults_when_created_then_nodes_start_collapsed() {
        let settings = Settings::default();
        assert!(!settings.default_expanded);
        assert_eq!(settings.reproject, ReprojectStrategy::Full);
        assert_eq!(settings.render.indent_width, 2);
        assert!(settings.default_forest.is_none());
    }

    #[test]
    fn given_partial_overlay_when_merging_then_only_specified_fields_change() {
        let base = Settings::default();
        let overlay = RawSettings {
            reproject: Some(ReprojectStrategy::Splice),
            render: RawRenderConfig {
                collapsed_glyph: Some("+".into()),
                ..Default::default()
            },
            ..Default::default()
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.reproject, ReprojectStrategy::Splice);
        assert!(!result.default_expanded);
        assert_eq!(result.render.collapsed_glyph, "+");
        assert_eq!(result.render.expanded_glyph, "▾");
        assert_eq!(result.render.indent_width, 2);
    }

    #[test]
    fn given_tilde_in_default_forest_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            default_forest: Some(PathBuf::from("~/outline.toml")),
            ..Default::default()
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let forest = settings.default_forest.unwrap();
        assert!(forest.to_string_lossy().starts_with(&home));
        assert!(!forest.to_string_lossy().contains('~'));
    }

    #[test]
    fn given_settings_when_to_toml_then_roundtrips_strategy_name() {
        let settings = Settings {
            reproject: ReprojectStrategy::Splice,
            ..Default::default()
        };
        let toml = settings.to_toml().unwrap();
        assert!(toml.contains("reproject = \"splice\""));
    }
}
