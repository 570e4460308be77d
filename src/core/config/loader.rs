#![allow(clippy::result_large_err)]

use super::OverlayConfig;
use crate::core::config::ConfigValidator;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use std::env;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "workflow-overlay.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config from a root directory (root/workflow-overlay.toml).
    /// Environment variables override config file values; a missing file
    /// yields defaults plus env overrides. The result is validated.
    pub fn load_from_root(root: &Path) -> Result<OverlayConfig, AppError> {
        let config_path = root.join(CONFIG_FILE_NAME);
        let config_file = Self::load_from_file(&config_path)?;

        let mut config = config_file.unwrap_or_default();
        Self::apply_env_overrides(&mut config);
        ConfigValidator::validate(&config)?;

        tracing::debug!(path = %config_path.display(), "workflow overlay configuration loaded");
        Ok(config)
    }

    /// Load config from specific file path
    /// Returns Ok(None) if file doesn't exist
    pub fn load_from_file(path: &Path) -> Result<Option<OverlayConfig>, AppError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::new(
                ErrorCategory::IoError,
                format!("Failed to read config file {}: {}", path.display(), e),
            )
        })?;

        let config: OverlayConfig = toml::from_str(&content).map_err(|e| {
            AppError::new(
                ErrorCategory::ConfigError,
                format!("Failed to parse config file {}: {}", path.display(), e),
            )
        })?;

        Ok(Some(config))
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(config: &mut OverlayConfig) {
        if let Ok(base_url) = env::var("WORKFLOW_OVERLAY_BASE_URL") {
            config.links.base_url = base_url;
        }

        if let Ok(path) = env::var("WORKFLOW_OVERLAY_PENDING_ITEMS_PATH") {
            config.links.pending_items_path = path;
        }

        if let Ok(limit_str) = env::var("WORKFLOW_OVERLAY_RECENT_COMMENT_LIMIT") {
            match limit_str.parse::<usize>() {
                Ok(limit) => config.history.recent_comment_limit = limit,
                Err(_) => tracing::warn!(
                    value = %limit_str,
                    "ignoring invalid WORKFLOW_OVERLAY_RECENT_COMMENT_LIMIT"
                ),
            }
        }

        if let Ok(code) = env::var("WORKFLOW_OVERLAY_APPLY_WORKFLOW_CODE") {
            config.permissions.apply_workflow_code = code;
        }
    }

    /// Get documentation for supported environment variables
    pub fn env_var_documentation() -> &'static [&'static str] {
        &[
            "WORKFLOW_OVERLAY_BASE_URL - Override the absolute CMS base URL (default: http://localhost/)",
            "WORKFLOW_OVERLAY_PENDING_ITEMS_PATH - Override the pending items admin path",
            "WORKFLOW_OVERLAY_RECENT_COMMENT_LIMIT - Override history entries scanned for comments (default: 10)",
            "WORKFLOW_OVERLAY_APPLY_WORKFLOW_CODE - Override the permission code for assigning workflows (default: APPLY_WORKFLOW)",
            "WORKFLOW_OVERLAY_LOG_LEVEL - Override the default tracing level",
        ]
    }
}
