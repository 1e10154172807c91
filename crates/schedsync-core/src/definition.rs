//! Desired-side schedule types as they appear in an export bundle.
//!
//! A [`ScheduleDefinition`] describes one job the import pipeline wants to
//! exist on the target scheduler. The reserved [`LINEAGE_ID_PARAM`] parameter
//! carries the [`LineageId`] that correlates a definition with a previously
//! imported job across export/import cycles; the scheduler's own job ids are
//! not stable across those cycles.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Reserved parameter name carrying the logical job identity across
/// export/import cycles.
pub const LINEAGE_ID_PARAM: &str = "lineage-id";

/// A typed scalar parameter value from an export bundle.
///
/// Bundles carry parameters as loosely typed scalars; equality on this enum
/// is the comparison primitive used when correlating desired definitions with
/// live jobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl std::fmt::Display for ParamValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Bool(v) => write!(f, "{v}"),
            ParamValue::Int(v) => write!(f, "{v}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Text(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// One ordered `(name, value)` parameter pair from a definition.
///
/// Order is preserved as the bundle supplied it; duplicate names are tolerated
/// (last write wins when the list is flattened into a map).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobParam {
    pub name: String,
    pub value: ParamValue,
}

impl JobParam {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The logical job identity correlating export-time and import-time jobs.
///
/// This is the sole key used to decide that a desired definition and a live
/// job are the same logical job; paths and names are never used for that.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineageId(String);

impl LineageId {
    /// Builds a lineage id from a raw value, rejecting empty strings.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Extracts a lineage id from a parameter value.
    ///
    /// Only non-empty text values qualify; lineage ids are opaque strings in
    /// export bundles, so a boolean or numeric value under the reserved name
    /// is treated as absent rather than coerced.
    #[must_use]
    pub fn from_value(value: &ParamValue) -> Option<Self> {
        match value {
            ParamValue::Text(s) => Self::new(s.clone()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A desired scheduled job, as supplied by the export/import pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    #[serde(default)]
    pub job_name: Option<String>,
    /// Repository path of the executable resource the job runs.
    pub input_path: String,
    /// Repository path the job writes its output under.
    pub output_path: String,
    /// Ordered parameter list; may include the reserved lineage parameter.
    #[serde(default)]
    pub params: Vec<JobParam>,
    /// Trigger specification, passed through to the scheduler untouched.
    #[serde(default)]
    pub trigger: serde_json::Value,
}

impl ScheduleDefinition {
    /// Human-facing identity for logs: the job name when present, the input
    /// path otherwise.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.job_name.as_deref().unwrap_or(&self.input_path)
    }
}

/// Top-level shape of a YAML schedule-definition file.
#[derive(Debug, Deserialize)]
pub struct ScheduleFile {
    pub schedules: Vec<ScheduleDefinition>,
}

/// Load and validate schedule definitions from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_schedules(path: &Path) -> Result<ScheduleFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ScheduleFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let schedule_file: ScheduleFile =
        serde_yaml::from_str(&content).map_err(ConfigError::ScheduleFileParse)?;

    validate_schedules(&schedule_file)?;

    Ok(schedule_file)
}

fn validate_schedules(schedule_file: &ScheduleFile) -> Result<(), ConfigError> {
    let mut seen_lineage = HashSet::new();

    for definition in &schedule_file.schedules {
        if definition.input_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "schedule input_path must be non-empty".to_string(),
            ));
        }

        if definition.output_path.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "schedule '{}' has an empty output_path",
                definition.display_name()
            )));
        }

        // Two definitions with the same lineage id would fight over one
        // logical job slot during reconciliation. Last occurrence wins,
        // matching how the parameter list is flattened into a map.
        let lineage = definition
            .params
            .iter()
            .rev()
            .find(|p| p.name == LINEAGE_ID_PARAM)
            .and_then(|p| LineageId::from_value(&p.value));
        if let Some(lineage) = lineage {
            if !seen_lineage.insert(lineage.clone()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate lineage id '{lineage}' (schedule '{}')",
                    definition.display_name()
                )));
            }
        }
    }

    Ok(())
}

/// Returns `true` if `path` is the input source of any desired definition.
///
/// Used by the surrounding import pipeline when deciding how to handle a file
/// that schedules may reference. Paths in definitions are repository-absolute;
/// a missing leading `/` on `path` is tolerated.
#[must_use]
pub fn is_schedule_input_source(definitions: &[ScheduleDefinition], path: Option<&str>) -> bool {
    let Some(path) = path else {
        return false;
    };
    let canonical = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    definitions.iter().any(|d| d.input_path == canonical)
}
