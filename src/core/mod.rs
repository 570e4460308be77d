pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod fields;
pub mod job_guard;
pub mod permission;
pub mod resolver;
pub mod transitions;
pub mod types;

pub use binding::{ApplicabilityBinding, WorkflowEnvironment};
pub use config::{ConfigLoader, ConfigValidator, OverlayConfig};
pub use engine::{
    CmsContext, ContentObject, WorkflowAction, WorkflowActionInstance, WorkflowDefinition,
    WorkflowInstance, WorkflowService, WorkflowTransition,
};
pub use error::AppError;
pub use job_guard::{ActionProcessingState, JobConcurrencyGuard, JobStateTracker};
pub use permission::{Decision, PermissionOverlay};
pub use resolver::WorkflowResolver;
pub use transitions::{TransitionMenuBuilder, WorkflowActions};
pub use types::*;
