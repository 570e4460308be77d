#[path = "../support/mod.rs"]
mod support;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use support::FakeObject;
use workflow_overlay::core::job_guard::{
    ActionProcessingState, JobConcurrencyGuard, JobStateTracker,
};

/// Tracker that records how often it was asked.
#[derive(Default)]
struct CountingTracker {
    processing: bool,
    queries: AtomicUsize,
}

impl JobStateTracker for CountingTracker {
    fn action_is_processing(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.processing
    }
}

#[test]
fn test_object_outside_scheduled_publishing_never_processing() {
    let tracker = Arc::new(CountingTracker {
        processing: true,
        ..CountingTracker::default()
    });
    let guard = JobConcurrencyGuard::new(tracker.clone());
    let object = FakeObject::page(3);

    assert!(!guard.is_background_job_processing(&object));
    assert_eq!(tracker.queries.load(Ordering::SeqCst), 0);
}

#[test]
fn test_scheduled_object_follows_tracker() {
    let state = Arc::new(ActionProcessingState::new());
    let guard = JobConcurrencyGuard::new(state.clone());
    let object = FakeObject {
        scheduled: true,
        ..FakeObject::page(3)
    };

    assert!(!guard.is_background_job_processing(&object));
    state.set_action_is_processing(true);
    assert!(guard.is_background_job_processing(&object));
    state.set_action_is_processing(false);
    assert!(!guard.is_background_job_processing(&object));
}

#[test]
fn test_processing_scope_visible_across_threads() {
    let state = Arc::new(ActionProcessingState::new());
    let guard = JobConcurrencyGuard::new(state.clone());
    let object = Arc::new(FakeObject {
        scheduled: true,
        ..FakeObject::page(9)
    });

    let scope = state.begin();
    let observed = {
        let guard = guard.clone();
        let object = Arc::clone(&object);
        thread::spawn(move || guard.is_background_job_processing(object.as_ref()))
            .join()
            .unwrap()
    };
    assert!(observed);

    drop(scope);
    let observed = thread::spawn(move || guard.is_background_job_processing(object.as_ref()))
        .join()
        .unwrap();
    assert!(!observed);
}

#[test]
fn test_guard_debug_reports_flag() {
    let state = Arc::new(ActionProcessingState::new());
    let guard = JobConcurrencyGuard::new(state.clone());
    let _scope = state.begin();
    assert_eq!(
        format!("{:?}", guard),
        "JobConcurrencyGuard { processing: true }"
    );
}
