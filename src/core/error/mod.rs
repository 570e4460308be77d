use crate::core::types::{ErrorCategory, ErrorSeverity};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use workflow_overlay_types::FieldListError;

#[derive(Debug)]
pub struct AppError {
    pub category: ErrorCategory,
    pub severity: ErrorSeverity,
    pub code: String,
    pub message: String,
    pub context: HashMap<String, String>,
    pub recovery_suggestions: Vec<String>,
    pub occurred_at: DateTime<Utc>,
    pub source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new<T: Into<String>>(category: ErrorCategory, message: T) -> Self {
        let severity = match category {
            ErrorCategory::ValidationError
            | ErrorCategory::ConfigError
            | ErrorCategory::LookupError
            | ErrorCategory::SerializationError
            | ErrorCategory::IoError
            | ErrorCategory::InternalError => ErrorSeverity::Error,
            ErrorCategory::Unknown => ErrorSeverity::Info,
        };
        AppError {
            category,
            severity,
            code: format!("ERR-{}", uuid::Uuid::new_v4()),
            message: message.into(),
            context: HashMap::new(),
            recovery_suggestions: vec![],
            occurred_at: Utc::now(),
            source: None,
        }
    }

    /// Failure reported by the external workflow engine while looking something up.
    pub fn lookup<T: Into<String>>(message: T) -> Self {
        AppError::new(ErrorCategory::LookupError, message).with_code("WFO-LOOKUP")
    }

    pub fn with_source<T: Into<String>>(
        category: ErrorCategory,
        message: T,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        let mut error = AppError::new(category, message);
        error.source = Some(anyhow::anyhow!(source));
        error
    }

    pub fn with_context<T: Into<String>>(mut self, context: T) -> Self {
        self.context.insert("context".to_string(), context.into());
        self
    }

    pub fn with_code<T: Into<String>>(mut self, code: T) -> Self {
        self.code = code.into();
        self
    }

    pub fn with_suggestion<T: Into<String>>(mut self, suggestion: T) -> Self {
        self.recovery_suggestions.push(suggestion.into());
        self
    }

    pub fn severity(&self) -> ErrorSeverity {
        self.severity
    }

    pub fn add_context(&mut self, key: &str, value: &str) {
        self.context.insert(key.to_string(), value.to_string());
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.category, self.message)?;
        if !self.context.is_empty() {
            write!(f, " (Context: {:?})", self.context)?;
        }
        if let Some(ref source) = self.source {
            write!(f, "\nCaused by: {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError {
            category: ErrorCategory::InternalError,
            severity: ErrorSeverity::Error,
            code: "ANYHOW_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check the error details".to_string()],
            occurred_at: Utc::now(),
            source: Some(e),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError {
            category: ErrorCategory::IoError,
            severity: ErrorSeverity::Error,
            code: "IO_ERROR".to_string(),
            message: e.to_string(),
            context: HashMap::new(),
            recovery_suggestions: vec!["Check file permissions and paths".to_string()],
            occurred_at: Utc::now(),
            source: Some(anyhow::anyhow!(e)),
        }
    }
}

impl From<FieldListError> for AppError {
    fn from(e: FieldListError) -> Self {
        AppError::new(ErrorCategory::ValidationError, e.to_string())
            .with_code("WFO-FIELDS")
            .with_suggestion("Check that the host form uses tab sets for tab paths")
    }
}
