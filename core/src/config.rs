use crate::error::ConfigError;
use serde::Deserialize;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Upper bound on parent hops when resolving an inherited mapping.
    pub max_ancestor_depth: usize,

    /// When set, mappings persist to this JSON file instead of host storage.
    pub storage_path: Option<PathBuf>,

    pub menu: MenuLabels,
}

impl Default for ExtensionConfig {
    fn default() -> Self {
        Self {
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
            storage_path: None,
            menu: MenuLabels::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuLabels {
    pub root_title: String,
    pub no_container_title: String,
    pub no_containers_title: String,
}

impl Default for MenuLabels {
    fn default() -> Self {
        Self {
            root_title: "Always Open in Container".to_string(),
            no_container_title: "Default (No Container)".to_string(),
            no_containers_title: "No Containers Found".to_string(),
        }
    }
}

impl ExtensionConfig {
    /// Loads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_ancestor_depth == 0 {
            return Err(ConfigError::Invalid {
                field: "max_ancestor_depth",
                message: "must be at least 1".to_string(),
            });
        }
        let labels = [
            ("menu.root_title", &self.menu.root_title),
            ("menu.no_container_title", &self.menu.no_container_title),
            ("menu.no_containers_title", &self.menu.no_containers_title),
        ];
        for (field, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
