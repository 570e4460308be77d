#![allow(clippy::result_large_err)]

use crate::core::engine::{ContentObject, DefinitionRef, InstanceRef, WorkflowService};
use crate::core::error::AppError;
use std::cell::OnceCell;
use std::sync::Arc;

/// Resolves the effective workflow for one content object.
///
/// The running instance is looked up at most once per resolver; "no instance"
/// is remembered as well. A failed lookup is not remembered and is returned to
/// the caller unchanged. The resolver is tied to the object of its owning
/// binding and is not meant to be shared between threads.
pub struct WorkflowResolver {
    service: Arc<dyn WorkflowService>,
    effective: OnceCell<Option<InstanceRef>>,
}

impl WorkflowResolver {
    pub fn new(service: Arc<dyn WorkflowService>) -> Self {
        Self {
            service,
            effective: OnceCell::new(),
        }
    }

    pub fn service(&self) -> &Arc<dyn WorkflowService> {
        &self.service
    }

    /// The single running instance governing `object`, if any.
    pub fn resolve(&self, object: &dyn ContentObject) -> Result<Option<InstanceRef>, AppError> {
        if let Some(cached) = self.effective.get() {
            tracing::trace!(target_object = %object.identity(), "effective workflow served from cache");
            return Ok(cached.clone());
        }

        let instance = self.service.get_workflow_for(object)?;
        tracing::debug!(
            target_object = %object.identity(),
            instance = ?instance.as_ref().map(|i| i.id()),
            "resolved effective workflow"
        );
        Ok(self.effective.get_or_init(|| instance).clone())
    }

    /// The definition that would apply to `object`, whether or not an
    /// instance is running. Not cached.
    pub fn resolve_definition(
        &self,
        object: &dyn ContentObject,
    ) -> Result<Option<DefinitionRef>, AppError> {
        self.service.get_definition_for(object)
    }

    pub fn is_resolved(&self) -> bool {
        self.effective.get().is_some()
    }
}

impl std::fmt::Debug for WorkflowResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkflowResolver")
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
