#![allow(clippy::result_large_err)] // Engine lookups return AppError directly so failures propagate unchanged.

//! Contracts consumed from the workflow engine and the hosting CMS.
//!
//! The overlay never stores or executes workflows itself. Definitions,
//! instances, actions and transitions live in an external engine reached
//! through [`WorkflowService`]; content types opt in by implementing
//! [`ContentObject`].

use crate::core::error::AppError;
use std::sync::Arc;
use workflow_overlay_types::{
    ContentIdentity, DefinitionId, InstanceId, Member, TransitionId,
};

pub type DefinitionRef = Arc<dyn WorkflowDefinition>;
pub type InstanceRef = Arc<dyn WorkflowInstance>;
pub type ActionRef = Arc<dyn WorkflowAction>;
pub type ActionInstanceRef = Arc<dyn WorkflowActionInstance>;
pub type TransitionRef = Arc<dyn WorkflowTransition>;

/// A content type that can have workflow applied to it.
pub trait ContentObject: Send + Sync {
    /// Base class and record id used to key workflow instances.
    fn identity(&self) -> ContentIdentity;

    /// Definition assigned directly to this object. `None` means "inherit".
    fn workflow_definition_id(&self) -> Option<DefinitionId>;

    /// Supplementary definitions, in declared order.
    fn additional_workflow_definition_ids(&self) -> Vec<DefinitionId> {
        Vec::new()
    }

    /// Base edit rights, evaluated without any workflow overlay.
    fn can_edit(&self, actor: Option<&Member>) -> bool;

    fn is_archived(&self) -> bool {
        false
    }

    /// Whether this object takes part in scheduled (embargo/expiry) publishing.
    fn participates_in_scheduled_publishing(&self) -> bool {
        false
    }

    /// Whether the object has a separate settings form, so workflow
    /// configuration fields belong there rather than on the main form.
    fn has_settings_fields(&self) -> bool {
        false
    }

    /// Whether the object can be previewed and edited through the CMS UI.
    fn is_previewable(&self) -> bool {
        false
    }

    /// Relative CMS edit link for previewable objects.
    fn cms_edit_link(&self) -> Option<String> {
        None
    }

    /// Relative fallback link for objects that are not previewable.
    fn workflow_link(&self) -> Option<String> {
        None
    }
}

/// A named graph of workflow actions and transitions.
pub trait WorkflowDefinition: Send + Sync {
    fn id(&self) -> DefinitionId;

    fn title(&self) -> &str;

    /// Entry action used to start a new instance.
    fn initial_action(&self) -> Option<ActionRef>;

    /// Label overriding the initial action's title on the start button.
    fn initial_action_button_text(&self) -> Option<&str> {
        None
    }

    /// Static policy: may `actor` publish `target` directly under this definition?
    fn can_workflow_publish(&self, actor: &Member, target: &dyn ContentObject) -> bool;
}

/// An action node of a definition.
pub trait WorkflowAction: Send + Sync {
    fn title(&self) -> &str;

    /// Called after the workflow target was written. Failures are the action's
    /// own concern.
    fn target_updated(&self, instance: &dyn WorkflowInstance);
}

/// One running application of a definition to exactly one content object.
pub trait WorkflowInstance: Send + Sync {
    fn id(&self) -> InstanceId;

    fn title(&self) -> String {
        self.definition().title().to_string()
    }

    fn definition(&self) -> DefinitionRef;

    fn current_action(&self) -> Option<ActionInstanceRef>;

    /// `None` means the instance has no opinion on editing its target.
    fn can_edit_target(&self) -> Option<bool>;

    /// `None` means the instance has no opinion on publishing its target.
    fn can_publish_target(&self) -> Option<bool>;

    /// Whether the current actor may modify the instance itself.
    fn can_edit(&self) -> bool;
}

/// An action as reached by a particular instance; also a workflow history entry.
pub trait WorkflowActionInstance: Send + Sync {
    fn valid_transitions(&self) -> Vec<TransitionRef>;

    /// The definition-level action whose behaviour hooks apply.
    fn base_action(&self) -> ActionRef;

    fn comment(&self) -> Option<&str> {
        None
    }
}

pub trait WorkflowTransition: Send + Sync {
    fn id(&self) -> TransitionId;

    fn title(&self) -> &str;

    /// Whether the current actor may take this transition on `instance`.
    fn can_execute(&self, instance: &dyn WorkflowInstance) -> bool;
}

/// Lookup service exposed by the workflow engine.
pub trait WorkflowService: Send + Sync {
    /// The single running instance governing `target`, if any.
    fn get_workflow_for(&self, target: &dyn ContentObject) -> Result<Option<InstanceRef>, AppError>;

    /// The definition that applies to `target`, directly or inherited.
    fn get_definition_for(
        &self,
        target: &dyn ContentObject,
    ) -> Result<Option<DefinitionRef>, AppError>;

    /// Every applicable definition: the effective one first, then additional
    /// definitions in declared order.
    fn get_definitions_for(&self, target: &dyn ContentObject)
        -> Result<Vec<DefinitionRef>, AppError>;

    /// Past and current action instances for `target`, most recent first.
    fn get_workflow_history_for(
        &self,
        target: &dyn ContentObject,
        limit: Option<usize>,
    ) -> Result<Vec<ActionInstanceRef>, AppError>;

    /// All known definitions, for configuration UIs.
    fn get_definitions(&self) -> Result<Vec<DefinitionRef>, AppError>;

    /// All instances, running or finished, whose target matches `identity`.
    fn get_instances_for(&self, identity: &ContentIdentity) -> Result<Vec<InstanceRef>, AppError>;
}

/// Ambient request state supplied by the hosting CMS.
pub trait CmsContext: Send + Sync {
    /// The authenticated member, if any.
    fn current_member(&self) -> Option<Member>;

    /// Whether the current member holds the named permission code.
    fn check_permission(&self, code: &str) -> bool;

    /// Whether the active admin controller renders workflow actions.
    fn controller_supports_workflow(&self) -> bool {
        true
    }
}
