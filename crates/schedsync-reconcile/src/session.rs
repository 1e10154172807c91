//! Ledger of job ids created during one import run.

use uuid::Uuid;

/// Append-only record of the job ids created by the current import run.
///
/// Later pipeline stages consult this to post-process what an import
/// created. One session belongs to exactly one run: construct it at run
/// start, pass it into [`crate::import_schedules`], and drop or
/// [`reset`](ImportSession::reset) it at run end. It is deliberately not
/// shared state; two concurrent runs must each own their own session.
#[derive(Debug)]
pub struct ImportSession {
    run_id: Uuid,
    created_job_ids: Vec<String>,
}

impl ImportSession {
    #[must_use]
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            created_job_ids: Vec::new(),
        }
    }

    /// Identifies this run in logs.
    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Records a created job id, keeping the ledger an ordered set.
    ///
    /// Recording the same id twice is a no-op; ids only enter the ledger
    /// once a create call has returned success.
    pub fn record_created_job_id(&mut self, job_id: impl Into<String>) {
        let job_id = job_id.into();
        if !self.created_job_ids.contains(&job_id) {
            self.created_job_ids.push(job_id);
        }
    }

    /// All recorded job ids, in creation order.
    #[must_use]
    pub fn created_job_ids(&self) -> &[String] {
        &self.created_job_ids
    }

    /// Clears the ledger for reuse within the same run.
    pub fn reset(&mut self) {
        self.created_job_ids.clear();
    }
}

impl Default for ImportSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_creation_order() {
        let mut session = ImportSession::new();
        session.record_created_job_id("job-2");
        session.record_created_job_id("job-1");
        session.record_created_job_id("job-3");
        assert_eq!(session.created_job_ids(), ["job-2", "job-1", "job-3"]);
    }

    #[test]
    fn duplicate_ids_are_recorded_once() {
        let mut session = ImportSession::new();
        session.record_created_job_id("job-1");
        session.record_created_job_id("job-1");
        assert_eq!(session.created_job_ids(), ["job-1"]);
    }

    #[test]
    fn reset_clears_the_ledger() {
        let mut session = ImportSession::new();
        session.record_created_job_id("job-1");
        session.reset();
        assert!(session.created_job_ids().is_empty());
    }

    #[test]
    fn each_session_gets_its_own_run_id() {
        assert_ne!(ImportSession::new().run_id(), ImportSession::new().run_id());
    }
}
