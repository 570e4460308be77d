#![allow(clippy::result_large_err)]

//! Edit/publish overrides driven by workflow state.
//!
//! Precedence, first decisive answer wins:
//!
//! 1. a background scheduled-publishing job is processing the object: allow;
//! 2. an effective instance exists: its own target opinion;
//! 3. (publish only) an applicable definition exists: deny without an
//!    authenticated actor, else the definition's static publish policy;
//! 4. no opinion.
//!
//! "No opinion" is `None` and tells the host to continue with its default
//! authorization chain.

use crate::core::engine::ContentObject;
use crate::core::error::AppError;
use crate::core::job_guard::JobConcurrencyGuard;
use crate::core::resolver::WorkflowResolver;
use crate::core::types::DecisionSource;
use workflow_overlay_types::Member;

/// Outcome of one authorization query together with the source that decided it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub allowed: Option<bool>,
    pub source: DecisionSource,
}

impl Decision {
    fn new(allowed: Option<bool>, source: DecisionSource) -> Self {
        Self { allowed, source }
    }

    fn no_opinion() -> Self {
        Self::new(None, DecisionSource::NoOpinion)
    }
}

pub struct PermissionOverlay<'a> {
    guard: &'a JobConcurrencyGuard,
    resolver: &'a WorkflowResolver,
}

impl<'a> PermissionOverlay<'a> {
    pub fn new(guard: &'a JobConcurrencyGuard, resolver: &'a WorkflowResolver) -> Self {
        Self { guard, resolver }
    }

    pub fn can_edit(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<Option<bool>, AppError> {
        Ok(self.decide_edit(object, actor)?.allowed)
    }

    pub fn can_publish(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<Option<bool>, AppError> {
        Ok(self.decide_publish(object, actor)?.allowed)
    }

    pub fn decide_edit(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<Decision, AppError> {
        let decision = if self.guard.is_background_job_processing(object) {
            Decision::new(Some(true), DecisionSource::BackgroundJob)
        } else if let Some(instance) = self.resolver.resolve(object)? {
            // Passed through verbatim: an undecided instance stays undecided.
            Decision::new(instance.can_edit_target(), DecisionSource::WorkflowInstance)
        } else {
            Decision::no_opinion()
        };

        tracing::debug!(
            target_object = %object.identity(),
            actor = ?actor.map(|m| m.id),
            allowed = ?decision.allowed,
            source = %decision.source,
            "workflow edit decision"
        );
        Ok(decision)
    }

    pub fn decide_publish(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<Decision, AppError> {
        let decision = self.publish_decision(object, actor)?;
        tracing::debug!(
            target_object = %object.identity(),
            actor = ?actor.map(|m| m.id),
            allowed = ?decision.allowed,
            source = %decision.source,
            "workflow publish decision"
        );
        Ok(decision)
    }

    fn publish_decision(
        &self,
        object: &dyn ContentObject,
        actor: Option<&Member>,
    ) -> Result<Decision, AppError> {
        if self.guard.is_background_job_processing(object) {
            return Ok(Decision::new(Some(true), DecisionSource::BackgroundJob));
        }

        if let Some(instance) = self.resolver.resolve(object)? {
            if let Some(publish) = instance.can_publish_target() {
                return Ok(Decision::new(
                    Some(publish),
                    DecisionSource::WorkflowInstance,
                ));
            }
        }

        // Even without a running instance a definition can forbid direct publishing.
        let Some(definition) = self.resolver.resolve_definition(object)? else {
            return Ok(Decision::no_opinion());
        };
        let Some(actor) = actor else {
            return Ok(Decision::new(Some(false), DecisionSource::MissingActor));
        };
        Ok(Decision::new(
            Some(definition.can_workflow_publish(actor, object)),
            DecisionSource::WorkflowDefinition,
        ))
    }
}
