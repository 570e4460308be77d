use serde::{Deserialize, Serialize};

/// Overlay configuration loaded from workflow-overlay.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OverlayConfig {
    /// Absolute link construction
    #[serde(default)]
    pub links: LinksConfig,

    /// Workflow history lookups
    #[serde(default)]
    pub history: HistoryConfig,

    /// Permission codes checked against the CMS
    #[serde(default)]
    pub permissions: PermissionsConfig,

    /// Labels for contributed fields and menus
    #[serde(default)]
    pub labels: LabelsConfig,
}

/// Link configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Absolute base URL of the CMS
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Admin path listing pending workflow items
    #[serde(default = "default_pending_items_path")]
    pub pending_items_path: String,
}

/// History configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// History entries scanned when looking for the latest comment
    #[serde(default = "default_recent_comment_limit")]
    pub recent_comment_limit: usize,
}

/// Permission configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermissionsConfig {
    /// Code required to assign workflow definitions to content
    #[serde(default = "default_apply_workflow_code")]
    pub apply_workflow_code: String,
}

/// Field and menu labels. Hosts translate these for their locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub applied_workflow: String,
    pub inherit_from_parent: String,
    pub additional_workflows: String,
    pub effective_workflow: String,
    pub workflow_log: String,
    pub workflow_options: String,
}

// Default functions
fn default_base_url() -> String {
    "http://localhost/".to_string()
}

fn default_pending_items_path() -> String {
    "admin/workflows/WorkflowDefinition/EditForm/field".to_string()
}

fn default_recent_comment_limit() -> usize {
    10
}

fn default_apply_workflow_code() -> String {
    "APPLY_WORKFLOW".to_string()
}

impl Default for LinksConfig {
    fn default() -> Self {
        LinksConfig {
            base_url: default_base_url(),
            pending_items_path: default_pending_items_path(),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        HistoryConfig {
            recent_comment_limit: default_recent_comment_limit(),
        }
    }
}

impl Default for PermissionsConfig {
    fn default() -> Self {
        PermissionsConfig {
            apply_workflow_code: default_apply_workflow_code(),
        }
    }
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            applied_workflow: "Applied Workflow".to_string(),
            inherit_from_parent: "Inherit from parent".to_string(),
            additional_workflows: "Additional Workflows".to_string(),
            effective_workflow: "Effective Workflow".to_string(),
            workflow_log: "Workflow Log".to_string(),
            workflow_options: "Workflow options".to_string(),
        }
    }
}


pub mod loader;
pub mod validation;

pub use loader::ConfigLoader;
pub use validation::ConfigValidator;
