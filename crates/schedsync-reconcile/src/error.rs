use thiserror::Error;

/// Errors raised by a scheduler-control backend.
///
/// Transport-agnostic: the HTTP adapter maps its failures into these
/// variants, and test fakes construct them directly.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The backend could not be reached or the call failed in transit.
    #[error("scheduler {operation} failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend answered but refused the operation.
    #[error("scheduler {operation} rejected with status {status}")]
    Rejected { operation: &'static str, status: u16 },

    /// The backend answered with a body this crate cannot use.
    #[error("scheduler {operation} returned an unusable response: {reason}")]
    InvalidResponse {
        operation: &'static str,
        reason: String,
    },
}

/// Fatal reconciliation errors.
///
/// Everything else during a pass is per-definition and surfaces as a
/// [`schedsync_core::ReconcileOutcome::Failed`] entry instead of an error.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The scheduler could not be paused; no mutation was attempted.
    #[error("failed to pause scheduler before import: {0}")]
    Pause(#[source] SchedulerError),

    /// The scheduler could not be resumed after the batch completed.
    #[error("failed to resume scheduler after import: {0}")]
    Resume(#[source] SchedulerError),
}
