//! Discovery and merging of Reverie config layers.
//!
//! Precedence, lowest first: `~/.reverie/reverie.json5`, `./reverie.json5`,
//! `./.reverie/reverie.json5`, an explicit `--config` file, then command-line
//! overrides. Home and working-directory files are optional; an explicit file
//! must exist. Every layer, overrides included, passes the same key check.

mod merge;
mod schema;

#[cfg(test)]
mod tests;

use crate::{ConfigError, ReverieConfig};
use directories::UserDirs;
use log::{debug, info};
use serde_json::{Map, Value, json};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Config file name looked up in each location.
pub const CONFIG_FILE_NAME: &str = "reverie.json5";
/// Per-user and per-project config directory.
pub const CONFIG_DIR_NAME: &str = ".reverie";

/// Where a layer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// `~/.reverie/reverie.json5`.
    User,
    /// `reverie.json5` in the working directory.
    Cwd,
    /// `.reverie/reverie.json5` in the working directory.
    Project,
    /// File named with `--config`.
    Explicit,
    /// Command-line flags.
    Overrides,
}

impl ConfigSource {
    fn label(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Cwd => "cwd",
            Self::Project => "project",
            Self::Explicit => "explicit",
            Self::Overrides => "overrides",
        }
    }
}

/// A layer that contributed to the effective config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLayer {
    pub source: ConfigSource,
    /// File the layer was read from; `None` for command-line overrides.
    pub path: Option<PathBuf>,
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}({})", self.source.label(), path.display()),
            None => f.write_str(self.source.label()),
        }
    }
}

/// Effective config plus the layers it was built from, lowest precedence first.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub config: ReverieConfig,
    pub layers: Vec<ConfigLayer>,
}

/// Settings given on the command line; they win over every file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub model: Option<String>,
    pub memory_path: Option<PathBuf>,
    pub prompt_template_path: Option<PathBuf>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self.model.is_none() && self.memory_path.is_none() && self.prompt_template_path.is_none()
    }

    /// Express the overrides as a config layer.
    fn to_layer(&self) -> Value {
        let mut layer = Map::new();
        if let Some(model) = &self.model {
            layer.insert("model".to_string(), json!({ "name": model }));
        }
        if let Some(path) = &self.memory_path {
            layer.insert(
                "memory".to_string(),
                json!({ "path": path.to_string_lossy() }),
            );
        }
        if let Some(path) = &self.prompt_template_path {
            layer.insert(
                "prompt".to_string(),
                json!({ "template_path": path.to_string_lossy() }),
            );
        }
        Value::Object(layer)
    }
}

/// Where to look for config and what to apply on top.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory searched for `reverie.json5` and `.reverie/reverie.json5`.
    pub cwd: PathBuf,
    /// User-level file; `None` skips the user layer.
    pub user_config: Option<PathBuf>,
    /// File given with `--config`.
    pub config_file: Option<PathBuf>,
    pub overrides: ConfigOverrides,
}

impl LoadOptions {
    /// Options with the default user file and no explicit file or overrides.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config: default_user_config(),
            config_file: None,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn without_user_layer(mut self) -> Self {
        self.user_config = None;
        self
    }

    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Candidate files in precedence order, with whether each must exist.
    fn candidates(&self) -> Vec<(ConfigSource, PathBuf, bool)> {
        let mut candidates = Vec::with_capacity(4);
        if let Some(path) = &self.user_config {
            candidates.push((ConfigSource::User, path.clone(), false));
        }
        candidates.push((ConfigSource::Cwd, self.cwd.join(CONFIG_FILE_NAME), false));
        candidates.push((
            ConfigSource::Project,
            self.cwd.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            false,
        ));
        if let Some(path) = &self.config_file {
            candidates.push((ConfigSource::Explicit, path.clone(), true));
        }
        candidates
    }
}

impl ReverieConfig {
    /// Parse and validate a single JSON5 document.
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        let value = parse_layer(contents, "inline")?;
        schema::validate_layer_schema(&value, "inline")?;
        decode(value)
    }

    /// Discover, merge, and validate every layer described by `options`.
    pub fn load(options: &LoadOptions) -> Result<LayeredConfig, ConfigError> {
        let mut merged = Value::Object(Map::new());
        let mut layers = Vec::new();
        let mut seen = Vec::new();

        for (source, path, required) in options.candidates() {
            let identity = path.canonicalize().unwrap_or_else(|_| path.clone());
            if seen.contains(&identity) {
                debug!("config file already applied (source={source:?}, path={})", path.display());
                continue;
            }
            let layer = ConfigLayer {
                source,
                path: Some(path.clone()),
            };
            let label = layer.to_string();
            let contents = match fs::read_to_string(&path) {
                Ok(contents) => contents,
                Err(err) if err.kind() == ErrorKind::NotFound && !required => {
                    debug!("no config file (source={source:?}, path={})", path.display());
                    continue;
                }
                Err(source) => return Err(ConfigError::Read { layer: label, source }),
            };
            let value = parse_layer(&contents, &label)?;
            schema::validate_layer_schema(&value, &label)?;
            merge::merge_json_values(&mut merged, &value);
            seen.push(identity);
            layers.push(layer);
        }

        if !options.overrides.is_empty() {
            let value = options.overrides.to_layer();
            schema::validate_layer_schema(&value, ConfigSource::Overrides.label())?;
            merge::merge_json_values(&mut merged, &value);
            layers.push(ConfigLayer {
                source: ConfigSource::Overrides,
                path: None,
            });
        }

        let config = decode(merged)?;
        info!("config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory.path.as_os_str().is_empty() {
            return Err(ConfigError::invalid("memory.path", "must not be empty"));
        }
        if self.model.name.trim().is_empty() {
            return Err(ConfigError::invalid("model.name", "must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.model.temperature) {
            return Err(ConfigError::invalid(
                "model.temperature",
                "must be between 0 and 2",
            ));
        }
        if self.model.api_key_env.trim().is_empty() {
            return Err(ConfigError::invalid("model.api_key_env", "must not be empty"));
        }
        if self.agent.max_tool_iterations == 0 {
            return Err(ConfigError::invalid(
                "agent.max_tool_iterations",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

fn parse_layer(contents: &str, label: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::Parse {
        layer: label.to_string(),
        source,
    })
}

fn decode(value: Value) -> Result<ReverieConfig, ConfigError> {
    let config: ReverieConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}

fn default_user_config() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
