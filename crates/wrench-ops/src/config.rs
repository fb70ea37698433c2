//! Configuration for the operations layer.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{OpsError, OpsResult};

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const CONFIG_KEYS: &[&str] = &[
    "output_dir",
    "dump_suffix",
    "marker_namespace",
    "marker_name",
    "annotation_namespace",
    "field_template",
];

/// Configuration for v8-wrench operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory receiving the generated `.tq` files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name suffix of symbol dumps when scanning directories.
    #[serde(default = "default_dump_suffix")]
    pub dump_suffix: String,

    /// Names the generator looks for in the C++ sources.
    #[serde(default)]
    pub conventions: Conventions,
}

/// C++ naming conventions that mark torqueable classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conventions {
    /// Namespace of the friend marker template (`tq` in `tq::Torque`).
    #[serde(default = "default_marker_namespace")]
    pub marker_namespace: String,

    /// Name of the friend marker template (`Torque` in `tq::Torque`).
    #[serde(default = "default_marker_name")]
    pub marker_name: String,

    /// Namespace every annotation record must be declared in.
    #[serde(default = "default_annotation_namespace")]
    pub annotation_namespace: String,

    /// Template wrapping the type of `k<Name>Offset` constants.
    #[serde(default = "default_field_template")]
    pub field_template: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src/objects")
}

fn default_dump_suffix() -> String {
    ".symbols.json".to_string()
}

fn default_marker_namespace() -> String {
    "tq".to_string()
}

fn default_marker_name() -> String {
    "Torque".to_string()
}

fn default_annotation_namespace() -> String {
    "tq".to_string()
}

fn default_field_template() -> String {
    "Field".to_string()
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            marker_namespace: default_marker_namespace(),
            marker_name: default_marker_name(),
            annotation_namespace: default_annotation_namespace(),
            field_template: default_field_template(),
        }
    }
}

impl Conventions {
    /// `tq::Torque`.
    pub fn marker_qualified_name(&self) -> String {
        if self.marker_namespace.is_empty() {
            return self.marker_name.clone();
        }
        format!("{}::{}", self.marker_namespace, self.marker_name)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            dump_suffix: default_dump_suffix(),
            conventions: Conventions::default(),
        }
    }
}

impl Config {
    /// Load configuration from disk with environment overrides.
    pub fn load() -> OpsResult<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();

        let config = match Self::config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };

        Ok(config.with_env_overrides())
    }

    /// Read a configuration file.
    pub fn from_file(path: &Path) -> OpsResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Apply `WRENCH_OUTPUT_DIR` and `WRENCH_DUMP_SUFFIX`.
    pub fn with_env_overrides(self) -> Self {
        Self {
            output_dir: std::env::var("WRENCH_OUTPUT_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(self.output_dir),
            dump_suffix: std::env::var("WRENCH_DUMP_SUFFIX")
                .ok()
                .unwrap_or(self.dump_suffix),
            ..self
        }
    }

    /// Save configuration to disk.
    pub fn save(&self) -> OpsResult<()> {
        if let Some(path) = Self::config_file_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> OpsResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_file_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "v8-wrench", "wrench")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Get a configuration value by key. Dashes and underscores are
    /// interchangeable.
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "output_dir" => Some(self.output_dir.display().to_string()),
            "dump_suffix" => Some(self.dump_suffix.clone()),
            "marker_namespace" => Some(self.conventions.marker_namespace.clone()),
            "marker_name" => Some(self.conventions.marker_name.clone()),
            "annotation_namespace" => Some(self.conventions.annotation_namespace.clone()),
            "field_template" => Some(self.conventions.field_template.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key.
    pub fn set(&mut self, key: &str, value: &str) -> OpsResult<()> {
        match key.replace('-', "_").as_str() {
            "output_dir" => {
                self.output_dir = normalize_output_dir(Path::new(value))?;
            }
            "dump_suffix" => {
                self.dump_suffix = non_empty(key, value)?;
            }
            "marker_namespace" => {
                self.conventions.marker_namespace = value.to_string();
            }
            "marker_name" => {
                self.conventions.marker_name = non_empty(key, value)?;
            }
            "annotation_namespace" => {
                self.conventions.annotation_namespace = value.to_string();
            }
            "field_template" => {
                self.conventions.field_template = non_empty(key, value)?;
            }
            _ => {
                return Err(OpsError::Config(format!(
                    "Unknown config key: {}. Valid keys: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Reject empty output directories and drop trailing separators.
///
/// The path is rebuilt from its components, so non-UTF-8 names survive
/// unchanged.
pub fn normalize_output_dir(path: &Path) -> OpsResult<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(OpsError::Config("output directory must not be empty".to_string()));
    }
    Ok(path.components().collect())
}

fn non_empty(key: &str, value: &str) -> OpsResult<String> {
    if value.is_empty() {
        return Err(OpsError::Config(format!("{key} must not be empty")));
    }
    Ok(value.to_string())
}
