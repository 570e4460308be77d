//! Background-job override for scheduled publishing.
//!
//! The scheduled publish/unpublish runner has to write objects that a running
//! workflow would otherwise lock. The runner flags its work through a
//! [`JobStateTracker`]; while the flag is up, the permission overlay grants
//! edit and publish unconditionally.

use crate::core::engine::ContentObject;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide answer to "is the background runner processing an action?".
pub trait JobStateTracker: Send + Sync {
    fn action_is_processing(&self) -> bool;
}

/// Default tracker backed by an atomic flag.
///
/// Construct one per process and share it with the job runner and every
/// binding. The runner must raise the flag before mutating and lower it only
/// after it finished; [`ActionProcessingState::begin`] does both.
#[derive(Debug, Default)]
pub struct ActionProcessingState {
    processing: AtomicBool,
}

impl ActionProcessingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_action_is_processing(&self, processing: bool) {
        self.processing.store(processing, Ordering::SeqCst);
    }

    /// Raise the flag until the returned scope is dropped.
    pub fn begin(&self) -> ProcessingScope<'_> {
        self.set_action_is_processing(true);
        tracing::debug!("scheduled action processing started");
        ProcessingScope { state: self }
    }
}

impl JobStateTracker for ActionProcessingState {
    fn action_is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }
}

/// Lowers the processing flag on drop.
#[must_use = "the processing flag is cleared as soon as the scope is dropped"]
pub struct ProcessingScope<'a> {
    state: &'a ActionProcessingState,
}

impl Drop for ProcessingScope<'_> {
    fn drop(&mut self) {
        self.state.set_action_is_processing(false);
        tracing::debug!("scheduled action processing finished");
    }
}

/// Capability check plus tracker query, shared by all bindings.
#[derive(Clone)]
pub struct JobConcurrencyGuard {
    tracker: Arc<dyn JobStateTracker>,
}

impl JobConcurrencyGuard {
    pub fn new(tracker: Arc<dyn JobStateTracker>) -> Self {
        Self { tracker }
    }

    pub fn is_background_job_processing(&self, object: &dyn ContentObject) -> bool {
        // Objects outside scheduled publishing can't have such a job running.
        if !object.participates_in_scheduled_publishing() {
            return false;
        }
        self.tracker.action_is_processing()
    }
}

impl fmt::Debug for JobConcurrencyGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobConcurrencyGuard")
            .field("processing", &self.tracker.action_is_processing())
            .finish()
    }
}
