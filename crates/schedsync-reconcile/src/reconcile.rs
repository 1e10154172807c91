//! The reconciliation control loop.

use schedsync_core::{DefinitionOutcome, ReconcileOutcome, ScheduleDefinition};

use crate::error::{ReconcileError, SchedulerError};
use crate::matcher::find_existing;
use crate::params::{lineage_key, param_map};
use crate::sanitize::{needs_sanitizing, sanitize};
use crate::scheduler::SchedulerControl;
use crate::session::ImportSession;

/// Reconciles desired schedule definitions against the live scheduler.
///
/// The scheduler is paused for the whole pass so triggers cannot fire while
/// jobs are being removed and recreated, then resumed unconditionally once
/// every definition has been processed. Definitions are handled strictly in
/// input order, one at a time; the live job set is re-queried per definition
/// because removals shrink it mid-pass.
///
/// Per definition: an existing job with the same lineage id is either
/// replaced (`overwrite_existing`) or left in place; creation failures get a
/// single retry with sanitized paths when a path contains a space; any other
/// failure marks that definition [`ReconcileOutcome::Failed`] and the batch
/// moves on. Created job ids are recorded in `session`.
///
/// An empty `definitions` slice is a no-op: the scheduler is never paused.
///
/// # Errors
///
/// Returns [`ReconcileError::Pause`] if the scheduler cannot be paused (in
/// which case nothing was mutated), or [`ReconcileError::Resume`] if it
/// cannot be resumed after the batch (outcomes and ledger entries up to that
/// point stand). No other condition is an error; callers inspect the
/// returned outcomes for per-definition failures.
pub async fn import_schedules<S: SchedulerControl>(
    scheduler: &S,
    session: &mut ImportSession,
    definitions: &[ScheduleDefinition],
    overwrite_existing: bool,
) -> Result<Vec<DefinitionOutcome>, ReconcileError> {
    if definitions.is_empty() {
        return Ok(Vec::new());
    }

    scheduler.pause().await.map_err(ReconcileError::Pause)?;
    tracing::info!(
        run_id = %session.run_id(),
        definitions = definitions.len(),
        overwrite_existing,
        "scheduler paused, reconciling schedules"
    );

    let mut outcomes = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let outcome = reconcile_one(scheduler, session, definition, overwrite_existing).await;
        outcomes.push(DefinitionOutcome {
            input_path: definition.input_path.clone(),
            outcome,
        });
    }

    scheduler.resume().await.map_err(ReconcileError::Resume)?;
    tracing::info!(run_id = %session.run_id(), "scheduler resumed");

    Ok(outcomes)
}

/// Handles one definition: match against live jobs, optionally remove the
/// match, create, with the single sanitized retry on failure.
async fn reconcile_one<S: SchedulerControl>(
    scheduler: &S,
    session: &mut ImportSession,
    definition: &ScheduleDefinition,
    overwrite_existing: bool,
) -> ReconcileOutcome {
    let desired = param_map(&definition.params);
    let mut removed_existing = false;

    // Without a lineage key the definition can never correspond to an
    // existing job; matching is skipped and it is created fresh.
    if let Some(lineage) = lineage_key(&desired) {
        let live_jobs = match scheduler.list_jobs().await {
            Ok(jobs) => jobs,
            Err(error) => {
                tracing::warn!(
                    schedule = definition.display_name(),
                    error = %error,
                    "could not query live jobs, treating definition as new"
                );
                Vec::new()
            }
        };

        if let Some(existing) = find_existing(&live_jobs, &lineage) {
            if overwrite_existing {
                if let Err(error) = scheduler.remove_job(&existing.job_id).await {
                    tracing::error!(
                        schedule = definition.display_name(),
                        job_id = %existing.job_id,
                        error = %error,
                        "failed to remove existing job, leaving definition unimported"
                    );
                    return ReconcileOutcome::Failed;
                }
                removed_existing = true;
            } else {
                tracing::info!(
                    schedule = definition.display_name(),
                    job_id = %existing.job_id,
                    lineage = %lineage,
                    "job already exists and overwrite is disabled, skipping"
                );
                return ReconcileOutcome::Skipped;
            }
        }
    }

    let success = if removed_existing {
        ReconcileOutcome::Replaced
    } else {
        ReconcileOutcome::Created
    };

    match create_and_record(scheduler, session, definition).await {
        Ok(true) => success,
        Ok(false) => ReconcileOutcome::Failed,
        Err(error) => {
            if !needs_sanitizing(definition) {
                tracing::error!(
                    schedule = definition.display_name(),
                    error = %error,
                    "failed to create schedule"
                );
                return ReconcileOutcome::Failed;
            }

            tracing::info!(
                input_path = %definition.input_path,
                "schedule path contains spaces, retrying with underscored filename"
            );
            let fallback = sanitize(definition);
            match create_and_record(scheduler, session, &fallback).await {
                Ok(true) => success,
                Ok(false) => ReconcileOutcome::Failed,
                Err(retry_error) => {
                    tracing::error!(
                        schedule = definition.display_name(),
                        error = %error,
                        retry_error = %retry_error,
                        "failed to create schedule after sanitized retry"
                    );
                    ReconcileOutcome::Failed
                }
            }
        }
    }
}

/// Issues the create call and records the returned job id.
///
/// Returns `Ok(true)` when the backend accepted the job, `Ok(false)` when it
/// refused in-band with a non-OK status (which is never retried), and `Err`
/// when the call itself failed.
async fn create_and_record<S: SchedulerControl>(
    scheduler: &S,
    session: &mut ImportSession,
    definition: &ScheduleDefinition,
) -> Result<bool, SchedulerError> {
    let reply = scheduler.create_job(definition).await?;

    if !reply.is_ok() {
        tracing::error!(
            schedule = definition.display_name(),
            status = reply.status,
            "scheduler refused schedule creation"
        );
        return Ok(false);
    }

    if let Some(job_id) = reply.created_job_id() {
        session.record_created_job_id(job_id);
        tracing::info!(
            schedule = definition.display_name(),
            job_id,
            "schedule created"
        );
    }

    Ok(true)
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
