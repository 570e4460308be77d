use std::env;

/// Execution contexts that influence how logging is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Interactive CMS requests.
    Request,
    /// Scheduled publish/unpublish runners that should be quiet on the console.
    BackgroundJob,
    /// Test harnesses; console output is captured or discarded.
    Test,
}

/// Resolve the context requested by the host, honouring the background
/// override used when a job runner shares the host binary.
pub fn detect_context(requested: ExecutionContext) -> ExecutionContext {
    if requested == ExecutionContext::Request && background_override_enabled() {
        return ExecutionContext::BackgroundJob;
    }
    requested
}

fn background_override_enabled() -> bool {
    env::var("WORKFLOW_OVERLAY_BACKGROUND_JOB")
        .map(|value| value.trim() == "1")
        .unwrap_or(false)
}
