#![allow(clippy::result_large_err)]

//! Attachment of workflow behaviour to a single content object.
//!
//! A [`WorkflowEnvironment`] is built once per process; an
//! [`ApplicabilityBinding`] is created per request around one object and owns
//! the memoized effective-instance lookup for its lifetime. Create a new
//! binding to observe workflow changes made since the first lookup.

use crate::core::config::OverlayConfig;
use crate::core::engine::{
    ActionInstanceRef, CmsContext, ContentObject, DefinitionRef, InstanceRef, WorkflowService,
};
use crate::core::error::AppError;
use crate::core::fields::WorkflowFieldContributor;
use crate::core::job_guard::JobConcurrencyGuard;
use crate::core::permission::PermissionOverlay;
use crate::core::resolver::WorkflowResolver;
use crate::core::transitions::{apply_actions, TransitionMenuBuilder, WorkflowActions};
use crate::utils::join_links;
use std::sync::Arc;
use workflow_overlay_types::{FieldList, Member};

/// Process-wide collaborators shared by every binding.
#[derive(Clone)]
pub struct WorkflowEnvironment {
    pub service: Arc<dyn WorkflowService>,
    pub cms: Arc<dyn CmsContext>,
    pub guard: JobConcurrencyGuard,
    pub config: Arc<OverlayConfig>,
}

impl WorkflowEnvironment {
    pub fn new(
        service: Arc<dyn WorkflowService>,
        cms: Arc<dyn CmsContext>,
        guard: JobConcurrencyGuard,
        config: OverlayConfig,
    ) -> Self {
        Self {
            service,
            cms,
            guard,
            config: Arc::new(config),
        }
    }

    /// Bind workflow behaviour to `object` for the current request.
    pub fn bind(&self, object: Arc<dyn ContentObject>) -> ApplicabilityBinding {
        ApplicabilityBinding::new(object, self.clone())
    }
}

pub struct ApplicabilityBinding {
    object: Arc<dyn ContentObject>,
    env: WorkflowEnvironment,
    resolver: WorkflowResolver,
}

impl ApplicabilityBinding {
    pub fn new(object: Arc<dyn ContentObject>, env: WorkflowEnvironment) -> Self {
        let resolver = WorkflowResolver::new(Arc::clone(&env.service));
        Self {
            object,
            env,
            resolver,
        }
    }

    pub fn object(&self) -> &dyn ContentObject {
        self.object.as_ref()
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.env.config
    }

    /// The effective running instance; looked up once per binding.
    pub fn workflow_instance(&self) -> Result<Option<InstanceRef>, AppError> {
        self.resolver.resolve(self.object())
    }

    /// The definition that applies whether or not an instance is running.
    pub fn workflow_definition(&self) -> Result<Option<DefinitionRef>, AppError> {
        self.resolver.resolve_definition(self.object())
    }

    pub fn is_background_job_processing(&self) -> bool {
        self.env.guard.is_background_job_processing(self.object())
    }

    fn permissions(&self) -> PermissionOverlay<'_> {
        PermissionOverlay::new(&self.env.guard, &self.resolver)
    }

    /// Edit override for `actor`; `None` leaves the host's default rules in charge.
    pub fn can_edit(&self, actor: Option<&Member>) -> Result<Option<bool>, AppError> {
        self.permissions().can_edit(self.object(), actor)
    }

    /// Publish override for the ambient CMS member.
    pub fn can_publish(&self) -> Result<Option<bool>, AppError> {
        let member = self.env.cms.current_member();
        self.can_publish_as(member.as_ref())
    }

    pub fn can_publish_as(&self, actor: Option<&Member>) -> Result<Option<bool>, AppError> {
        self.permissions().can_publish(self.object(), actor)
    }

    /// Whether the ambient member may modify the running instance itself.
    pub fn can_edit_workflow(&self) -> Result<bool, AppError> {
        Ok(self
            .workflow_instance()?
            .map(|instance| instance.can_edit())
            .unwrap_or(false))
    }

    /// Workflow buttons for the ambient member.
    pub fn build_actions(&self) -> Result<WorkflowActions, AppError> {
        let member = self.env.cms.current_member();
        TransitionMenuBuilder::new(&self.resolver).build_actions(self.object(), member.as_ref())
    }

    /// Append workflow buttons to the host's action bar.
    ///
    /// Skipped when the active controller does not render workflow actions or
    /// the object is archived.
    pub fn update_cms_actions(&self, actions: &mut FieldList) -> Result<(), AppError> {
        if !self.env.cms.controller_supports_workflow() || self.object.is_archived() {
            tracing::debug!(
                target_object = %self.object.identity(),
                "workflow actions not applicable in this context"
            );
            return Ok(());
        }
        let built = self.build_actions()?;
        apply_actions(built, actions, &self.env.config.labels)?;
        Ok(())
    }

    fn field_contributor(&self) -> WorkflowFieldContributor<'_> {
        WorkflowFieldContributor::new(
            self.object(),
            &self.resolver,
            self.env.cms.as_ref(),
            &self.env.config,
        )
    }

    pub fn update_cms_fields(&self, fields: &mut FieldList) -> Result<(), AppError> {
        self.field_contributor().update_cms_fields(fields)
    }

    pub fn update_settings_fields(&self, fields: &mut FieldList) -> Result<(), AppError> {
        self.field_contributor().update_settings_fields(fields)
    }

    /// Tell the current action that its target was written.
    pub fn on_after_write(&self) -> Result<(), AppError> {
        let Some(instance) = self.workflow_instance()? else {
            return Ok(());
        };
        if let Some(current) = instance.current_action() {
            tracing::debug!(
                target_object = %self.object.identity(),
                instance = %instance.id(),
                "notifying workflow action of target update"
            );
            current.base_action().target_updated(instance.as_ref());
        }
        Ok(())
    }

    /// Every instance, running or finished, whose target is this object.
    pub fn workflow_instances(&self) -> Result<Vec<InstanceRef>, AppError> {
        self.env.service.get_instances_for(&self.object.identity())
    }

    pub fn workflow_history(&self, limit: Option<usize>) -> Result<Vec<ActionInstanceRef>, AppError> {
        self.env
            .service
            .get_workflow_history_for(self.object(), limit)
    }

    /// Most recent history entry carrying a non-empty comment, scanning at most
    /// `limit` entries (configured default when `None`).
    pub fn most_recent_comment(
        &self,
        limit: Option<usize>,
    ) -> Result<Option<ActionInstanceRef>, AppError> {
        let limit = limit.unwrap_or(self.env.config.history.recent_comment_limit);
        let history = self.workflow_history(Some(limit))?;
        Ok(history
            .into_iter()
            .find(|entry| entry.comment().is_some_and(|comment| !comment.is_empty())))
    }

    /// Absolute link into the CMS for this object.
    ///
    /// Previewable objects use their CMS edit link; others fall back to their
    /// workflow link. `None` when neither is available.
    pub fn absolute_edit_link(&self) -> Option<String> {
        let relative = if self.object.is_previewable() {
            self.object.cms_edit_link()
        } else {
            self.object.workflow_link()
        }?;
        Some(join_links(&[
            self.env.config.links.base_url.as_str(),
            relative.as_str(),
        ]))
    }

    /// Absolute link to this object's running instance in the pending items admin.
    pub fn link_to_pending_items(&self) -> Result<Option<String>, AppError> {
        let Some(instance) = self.workflow_instance()? else {
            return Ok(None);
        };
        let links = &self.env.config.links;
        let instance_id = instance.id().to_string();
        Ok(Some(join_links(&[
            links.base_url.as_str(),
            links.pending_items_path.as_str(),
            "PendingObjects",
            "item",
            instance_id.as_str(),
            "edit",
        ])))
    }

    /// Whether the scheduled-publishing subsystem should refrain from queueing
    /// its own jobs because workflow governs publication of this object.
    pub fn prevent_scheduled_queue_jobs(&self) -> Result<bool, AppError> {
        if self.workflow_instance()?.is_some() {
            return Ok(true);
        }
        Ok(self.workflow_definition()?.is_some())
    }
}

impl std::fmt::Debug for ApplicabilityBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicabilityBinding")
            .field("object", &self.object.identity())
            .field("resolver", &self.resolver)
            .finish()
    }
}
