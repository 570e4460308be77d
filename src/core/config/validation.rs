#![allow(clippy::result_large_err)]

use super::OverlayConfig;
use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use url::Url;

pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate configuration rules
    pub fn validate(config: &OverlayConfig) -> Result<(), AppError> {
        // Edit links are absolute, so the base must parse as an absolute http(s) URL
        let base = Url::parse(&config.links.base_url).map_err(|e| {
            AppError::new(
                ErrorCategory::ValidationError,
                format!("links.base_url is not a valid URL: {}", e),
            )
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "links.base_url must use http or https",
            ));
        }

        if config.links.pending_items_path.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "links.pending_items_path cannot be empty",
            ));
        }

        if config.history.recent_comment_limit == 0 {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "history.recent_comment_limit must be greater than zero",
            ));
        }

        if config.permissions.apply_workflow_code.trim().is_empty() {
            return Err(AppError::new(
                ErrorCategory::ValidationError,
                "permissions.apply_workflow_code cannot be empty",
            ));
        }

        Ok(())
    }
}
