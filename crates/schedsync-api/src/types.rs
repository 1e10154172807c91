//! Wire shapes of the scheduler's REST control surface.
//!
//! The scheduler speaks camelCase JSON; these types isolate that convention
//! from the domain model.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use schedsync_core::{JobState, LiveJob, ParamValue, ScheduleDefinition};

/// One job as returned by the `scheduler/jobs` endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireJob {
    pub job_id: String,
    pub job_name: String,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub state: JobState,
    #[serde(default)]
    pub next_run: Option<DateTime<Utc>>,
    #[serde(default)]
    pub job_params: Vec<WireParam>,
}

/// A named parameter on the wire, shared by job listings and creation
/// requests.
#[derive(Debug, Serialize, Deserialize)]
pub struct WireParam {
    pub name: String,
    pub value: ParamValue,
}

impl From<WireJob> for LiveJob {
    fn from(wire: WireJob) -> Self {
        // Scheduler-side keys are unique, but tolerate duplicates the same
        // way desired parameter lists are flattened: last write wins.
        let mut params = HashMap::with_capacity(wire.job_params.len());
        for param in wire.job_params {
            params.insert(param.name, param.value);
        }
        LiveJob {
            job_id: wire.job_id,
            job_name: wire.job_name,
            user_name: wire.user_name,
            state: wire.state,
            next_run: wire.next_run,
            params,
        }
    }
}

/// Body of a `scheduler/removeJob` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveJobRequest {
    pub job_id: String,
}

/// Body of a `scheduler/job` creation call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    pub input_file: String,
    pub output_file: String,
    pub job_parameters: Vec<WireParam>,
    pub trigger: serde_json::Value,
}

impl From<&ScheduleDefinition> for CreateJobRequest {
    fn from(definition: &ScheduleDefinition) -> Self {
        Self {
            job_name: definition.job_name.clone(),
            input_file: definition.input_path.clone(),
            output_file: definition.output_path.clone(),
            job_parameters: definition
                .params
                .iter()
                .map(|p| WireParam {
                    name: p.name.clone(),
                    value: p.value.clone(),
                })
                .collect(),
            trigger: definition.trigger.clone(),
        }
    }
}
