use crate::logging::layers::console::ConsoleOutput;
use crate::Result;
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing_subscriber::filter::Directive;

const DEFAULT_LEVEL: &str = "info";
pub const LOG_LEVEL_ENV: &str = "WORKFLOW_OVERLAY_LOG_LEVEL";

/// Resolved logging configuration after reading the config file and env overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
    pub default_level: String,
    pub enable_file: bool,
    pub console_output: Option<ConsoleOutput>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_level: DEFAULT_LEVEL.to_string(),
            enable_file: true,
            console_output: None,
        }
    }
}

impl LoggingConfig {
    /// Defaults, then `<root>/.workflow-overlay/config/logging.toml`, then env overrides.
    pub fn load(root: Option<&Path>) -> Result<Self> {
        let mut config = LoggingConfig::default();
        if let Some(root) = root {
            if let Some(section) = Self::load_from_root(root)? {
                config.apply(section);
            }
        }
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn config_path(root: &Path) -> PathBuf {
        root.join(".workflow-overlay")
            .join("config")
            .join("logging.toml")
    }

    fn load_from_root(root: &Path) -> Result<Option<TomlLoggingSection>> {
        let path = Self::config_path(root);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read logging config {}", path.display()))?;
        let parsed: TomlLogging = toml::from_str(&content)
            .with_context(|| format!("failed to parse logging config {}", path.display()))?;
        Ok(parsed.logging)
    }

    fn apply(&mut self, section: TomlLoggingSection) {
        if let Some(log_dir) = section.log_dir {
            self.log_dir = Some(PathBuf::from(log_dir));
        }
        if let Some(default_level) = section.default_level {
            self.default_level = default_level;
        }
        if let Some(enable_file) = section.enable_file {
            self.enable_file = enable_file;
        }
        if section.console_output.is_some() {
            self.console_output = section.console_output;
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var(LOG_LEVEL_ENV) {
            if !level.trim().is_empty() {
                self.default_level = level.trim().to_string();
            }
        }
    }

    fn validate(&self) -> Result<()> {
        Directive::from_str(&self.default_level)
            .map_err(|_| anyhow!("logging.default_level must be a valid tracing directive"))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct TomlLogging {
    logging: Option<TomlLoggingSection>,
}

#[derive(Debug, Deserialize)]
struct TomlLoggingSection {
    log_dir: Option<String>,
    default_level: Option<String>,
    enable_file: Option<bool>,
    #[serde(default)]
    console_output: Option<ConsoleOutput>,
}
