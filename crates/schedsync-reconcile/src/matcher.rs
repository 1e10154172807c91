//! Correlation of desired definitions with live jobs.

use schedsync_core::{LineageId, LiveJob};

/// Finds the live job matching a desired lineage key, if any.
///
/// Scans `live_jobs` in the order the backend returned them and returns the
/// first job whose lineage parameter equals `lineage`. A linear scan, not an
/// index: job sets are operator-sized, and the caller re-queries the live
/// set per definition anyway because removals shrink it mid-pass.
#[must_use]
pub fn find_existing<'a>(live_jobs: &'a [LiveJob], lineage: &LineageId) -> Option<&'a LiveJob> {
    live_jobs
        .iter()
        .find(|job| job.lineage_id().as_ref() == Some(lineage))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use schedsync_core::{JobState, ParamValue, LINEAGE_ID_PARAM};

    use super::*;

    fn live_job(job_id: &str, lineage: Option<&str>) -> LiveJob {
        let mut params = HashMap::new();
        if let Some(lineage) = lineage {
            params.insert(
                LINEAGE_ID_PARAM.to_owned(),
                ParamValue::Text(lineage.to_owned()),
            );
        }
        LiveJob {
            job_id: job_id.to_owned(),
            job_name: format!("job {job_id}"),
            user_name: None,
            state: JobState::Normal,
            next_run: None,
            params,
        }
    }

    fn lineage(value: &str) -> LineageId {
        LineageId::new(value).expect("non-empty lineage")
    }

    #[test]
    fn no_match_in_empty_set() {
        assert!(find_existing(&[], &lineage("x")).is_none());
    }

    #[test]
    fn jobs_without_lineage_are_never_matched() {
        let jobs = vec![live_job("job-1", None), live_job("job-2", None)];
        assert!(find_existing(&jobs, &lineage("x")).is_none());
    }

    #[test]
    fn first_match_wins_in_backend_order() {
        let jobs = vec![
            live_job("job-1", Some("other")),
            live_job("job-2", Some("wanted")),
            live_job("job-3", Some("wanted")),
        ];
        let matched = find_existing(&jobs, &lineage("wanted")).expect("match");
        assert_eq!(matched.job_id, "job-2");
    }

    #[test]
    fn lineage_comparison_is_exact() {
        let jobs = vec![live_job("job-1", Some("abc-123"))];
        assert!(find_existing(&jobs, &lineage("abc-12")).is_none());
        assert!(find_existing(&jobs, &lineage("abc-123")).is_some());
    }
}
