use serde::{Deserialize, Serialize};

/// Error category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    ValidationError,
    ConfigError,
    LookupError,
    SerializationError,
    IoError,
    InternalError,
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Error severity enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorSeverity {
    Error,
    Warning,
    Info,
    Debug,
}

/// Which authorization source produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    BackgroundJob,
    WorkflowInstance,
    WorkflowDefinition,
    MissingActor,
    NoOpinion,
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DecisionSource::BackgroundJob => "background_job",
            DecisionSource::WorkflowInstance => "workflow_instance",
            DecisionSource::WorkflowDefinition => "workflow_definition",
            DecisionSource::MissingActor => "missing_actor",
            DecisionSource::NoOpinion => "no_opinion",
        };
        write!(f, "{}", label)
    }
}
