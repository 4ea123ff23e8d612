//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/careertree/careertree.toml`
//! 3. Local config: `<project_dir>/.careertree.toml`
//! 4. Environment variables: `CAREERTREE_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{LayoutConfig, DEFAULT_MAX_DEPTH};

/// Raw layout config for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLayoutConfig {
    pub origin_x: Option<f64>,
    pub root_y: Option<f64>,
    pub stream_spacing: Option<f64>,
    pub level_height: Option<f64>,
    pub level_spacing: Option<Vec<f64>>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub taxonomy: Option<PathBuf>,
    pub max_depth: Option<usize>,
    #[serde(default)]
    pub layout: RawLayoutConfig,
}

/// Unified configuration for careertree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Taxonomy file (TOML or JSON); built-in catalog when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxonomy: Option<PathBuf>,
    /// Deepest allowed node level (root is 0)
    pub max_depth: usize,
    /// Diagram layout constants
    pub layout: LayoutConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            taxonomy: None,
            max_depth: DEFAULT_MAX_DEPTH,
            layout: LayoutConfig::default(),
        }
    }
}

/// Get the XDG config directory for careertree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "careertree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("careertree.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".careertree.toml")
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

fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(raw.as_ref()) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

impl Settings {
    /// Overlay wins for every value it specifies; arrays replace.
    ///
    /// A relative taxonomy path is resolved against `base_dir`, the
    /// directory of the file it came from.
    fn merge_with(&self, overlay: &RawSettings, base_dir: Option<&Path>) -> Self {
        let taxonomy = match (&overlay.taxonomy, base_dir) {
            (Some(p), Some(dir)) if p.is_relative() && !p.starts_with("~") => {
                Some(dir.join(p))
            }
            (Some(p), _) => Some(p.clone()),
            (None, _) => self.taxonomy.clone(),
        };
        let layout = &overlay.layout;
        Self {
            taxonomy,
            max_depth: overlay.max_depth.unwrap_or(self.max_depth),
            layout: LayoutConfig {
                origin_x: layout.origin_x.unwrap_or(self.layout.origin_x),
                root_y: layout.root_y.unwrap_or(self.layout.root_y),
                stream_spacing: layout.stream_spacing.unwrap_or(self.layout.stream_spacing),
                level_height: layout.level_height.unwrap_or(self.layout.level_height),
                level_spacing: layout
                    .level_spacing
                    .clone()
                    .unwrap_or_else(|| self.layout.level_spacing.clone()),
            },
        }
    }

    /// Expand `~`, `$VAR` and `${VAR}` in the taxonomy path.
    fn expand_paths(&mut self) {
        self.taxonomy = self.taxonomy.as_deref().map(expand_path);
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional project directory holding `.careertree.toml`
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), local_dir)
    }

    /// Load with an explicit global config path (missing files are skipped).
    pub fn load_from(
        global_path: Option<&Path>,
        local_dir: Option<&Path>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("loading global config {}", global_path.display());
                let raw = load_raw_settings(global_path)?;
                current = current.merge_with(&raw, global_path.parent());
            }
        }

        // 3. Local config
        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("loading local config {}", local_path.display());
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw, Some(dir));
            }
        }

        // 4. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();
        current.validate()?;

        Ok(current)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_depth == 0 {
            return Err(ApplicationError::Config {
                message: "max_depth must be at least 1".to_string(),
            });
        }
        self.layout.validate().map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    /// Apply CAREERTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("CAREERTREE")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("layout.level_spacing"),
            )
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    /// Copy every key present in `config` over `settings`.
    ///
    /// A key that is present but does not convert is an error, not a fallback.
    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ApplicationError> {
        if let Some(val) = override_value::<String>(config, "taxonomy")? {
            settings.taxonomy = Some(PathBuf::from(val));
        }
        if let Some(val) = override_value(config, "max_depth")? {
            settings.max_depth = val;
        }
        if let Some(val) = override_value(config, "layout.origin_x")? {
            settings.layout.origin_x = val;
        }
        if let Some(val) = override_value(config, "layout.root_y")? {
            settings.layout.root_y = val;
        }
        if let Some(val) = override_value(config, "layout.stream_spacing")? {
            settings.layout.stream_spacing = val;
        }
        if let Some(val) = override_value(config, "layout.level_height")? {
            settings.layout.level_height = val;
        }
        if let Some(val) = override_value(config, "layout.level_spacing")? {
            settings.layout.level_spacing = val;
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
        r#"# careertree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/careertree/careertree.toml
#   Local:  <project_dir>/.careertree.toml
#   Env:    CAREERTREE_* environment variables, e.g.
#           CAREERTREE_LAYOUT__LEVEL_SPACING=250,180,160
#
# Every value set here replaces the one from the layer below.

# Taxonomy file (.toml or .json); the built-in catalog is used when unset.
# Relative paths are resolved against the directory of this file.
# taxonomy = "careers.toml"

# Deepest node level allowed (root is 0, streams are 1)
# max_depth = 7

[layout]
# X of the first stream slot and Y of the root
# origin_x = 0.0
# root_y = 0.0

# Horizontal distance between streams
# stream_spacing = 300.0

# Vertical distance between levels
# level_height = 180.0

# Sibling spacing for children of a parent at depth 1, 2, ...
# level_spacing = [250.0, 180.0, 160.0, 140.0, 120.0, 100.0]
"#
        .to_string()
    }
}

/// Typed lookup of an override; None when the key is absent.
fn override_value<T: DeserializeOwned>(
    config: &Config,
    key: &str,
) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(ApplicationError::Config {
            message: format!("{}: {}", key, e),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
