//! Live-side job types, as queried from a running scheduler.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::definition::{LineageId, ParamValue, LINEAGE_ID_PARAM};

/// Trigger state of a live job, as reported by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JobState {
    Normal,
    Paused,
    Blocked,
    Complete,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Normal => write!(f, "NORMAL"),
            JobState::Paused => write!(f, "PAUSED"),
            JobState::Blocked => write!(f, "BLOCKED"),
            JobState::Complete => write!(f, "COMPLETE"),
            JobState::Error => write!(f, "ERROR"),
            JobState::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// An existing job on the scheduler.
///
/// Read-only from the reconciler's perspective except for deletion. The
/// `job_id` is scheduler-assigned and not stable across export/import cycles,
/// which is why correlation goes through the lineage parameter instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveJob {
    pub job_id: String,
    pub job_name: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub state: JobState,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
    /// Parameter mapping; keys are unique on the scheduler side.
    #[serde(default)]
    pub params: HashMap<String, ParamValue>,
}

impl LiveJob {
    /// The job's lineage id, when its parameters carry one.
    #[must_use]
    pub fn lineage_id(&self) -> Option<LineageId> {
        self.params
            .get(LINEAGE_ID_PARAM)
            .and_then(LineageId::from_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lineage_id_absent_when_param_missing() {
        let job = LiveJob {
            job_id: "job-1".to_owned(),
            job_name: "nightly".to_owned(),
            user_name: None,
            state: JobState::Normal,
            next_run: None,
            params: HashMap::new(),
        };
        assert!(job.lineage_id().is_none());
    }

    #[test]
    fn lineage_id_read_from_reserved_param() {
        let mut params = HashMap::new();
        params.insert(
            LINEAGE_ID_PARAM.to_owned(),
            ParamValue::Text("aa-bb".to_owned()),
        );
        let job = LiveJob {
            job_id: "job-1".to_owned(),
            job_name: "nightly".to_owned(),
            user_name: None,
            state: JobState::Normal,
            next_run: None,
            params,
        };
        assert_eq!(job.lineage_id().unwrap().as_str(), "aa-bb");
    }

    #[test]
    fn job_state_unknown_on_unrecognized_value() {
        let state: JobState = serde_json::from_str("\"SHUTDOWN\"").expect("parse");
        assert_eq!(state, JobState::Unknown);
        let state: JobState = serde_json::from_str("\"PAUSED\"").expect("parse");
        assert_eq!(state, JobState::Paused);
    }
}
