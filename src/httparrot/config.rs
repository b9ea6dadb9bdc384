use crate::error::{ParrotError, Result};
use crate::widget::TEMPLATES_ROOT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_NAMESPACE: &str = "Widget";
const DEFAULT_STATUS: u16 = 200;

/// Configuration for httparrot, stored in `<dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParrotConfig {
    /// Prefix of the `class` attribute seeded into every widget (`Widget::User`)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Where `template_file` paths resolve; the bundled templates when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templates_dir: Option<PathBuf>,

    /// Status code used when a caller does not pick one
    #[serde(default = "default_status")]
    pub default_status: u16,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_status() -> u16 {
    DEFAULT_STATUS
}

impl Default for ParrotConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            templates_dir: None,
            default_status: DEFAULT_STATUS,
        }
    }
}

impl ParrotConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(ParrotError::Io)?;
        let config: ParrotConfig =
            serde_json::from_str(&content).map_err(ParrotError::Serialization)?;
        tracing::debug!(path = %config_path.display(), "loaded config");
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(ParrotError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(ParrotError::Serialization)?;
        fs::write(config_path, content).map_err(ParrotError::Io)?;
        Ok(())
    }

    /// The effective templates directory.
    pub fn templates_root(&self) -> PathBuf {
        self.templates_dir
            .clone()
            .unwrap_or_else(|| TEMPLATES_ROOT.clone())
    }
}
