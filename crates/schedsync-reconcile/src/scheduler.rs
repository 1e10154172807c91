//! The scheduler-control contract consumed by the reconciler.

use async_trait::async_trait;
use schedsync_core::{LiveJob, ScheduleDefinition};

use crate::error::SchedulerError;

/// Reply from a job-creation call.
///
/// Carries the backend's status code plus the assigned job id, when the
/// backend returned one. A reply is only treated as a successful creation
/// when the status is OK-equivalent; the id is recorded in the session
/// ledger only when it is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateJobReply {
    pub status: u16,
    pub job_id: Option<String>,
}

impl CreateJobReply {
    #[must_use]
    pub fn ok(job_id: impl Into<String>) -> Self {
        Self {
            status: 200,
            job_id: Some(job_id.into()),
        }
    }

    /// Whether the status is OK-equivalent (2xx).
    #[must_use]
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The created job id, when the reply carries a non-empty one.
    #[must_use]
    pub fn created_job_id(&self) -> Option<&str> {
        self.job_id.as_deref().filter(|id| !id.is_empty())
    }
}

/// Control surface of the shared scheduler.
///
/// Pausing is a coarse mutual-exclusion mechanism against the scheduler's
/// own trigger-firing threads, not against other callers of the reconciler;
/// concurrent reconciliation runs against one scheduler must be serialized
/// by the caller.
#[async_trait]
pub trait SchedulerControl {
    /// Stops trigger firing until [`resume`](SchedulerControl::resume).
    async fn pause(&self) -> Result<(), SchedulerError>;

    /// Restarts trigger firing.
    async fn resume(&self) -> Result<(), SchedulerError>;

    /// All currently scheduled jobs, in the backend's order.
    async fn list_jobs(&self) -> Result<Vec<LiveJob>, SchedulerError>;

    /// Deletes one job by its scheduler-assigned id.
    async fn remove_job(&self, job_id: &str) -> Result<(), SchedulerError>;

    /// Creates a job from a desired definition.
    ///
    /// Implementations raise [`SchedulerError`] on transport or validation
    /// failure; a reply with a non-OK status is reserved for backends that
    /// report refusal in-band.
    async fn create_job(
        &self,
        definition: &ScheduleDefinition,
    ) -> Result<CreateJobReply, SchedulerError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_ok_requires_2xx() {
        assert!(CreateJobReply::ok("job-1").is_ok());
        assert!(CreateJobReply {
            status: 204,
            job_id: None
        }
        .is_ok());
        assert!(!CreateJobReply {
            status: 500,
            job_id: None
        }
        .is_ok());
    }

    #[test]
    fn created_job_id_filters_empty_bodies() {
        let reply = CreateJobReply {
            status: 200,
            job_id: Some(String::new()),
        };
        assert!(reply.created_job_id().is_none());
        assert_eq!(CreateJobReply::ok("job-9").created_job_id(), Some("job-9"));
    }
}
