pub mod app_config;
pub mod config;
pub mod definition;
pub mod error;
pub mod job;
pub mod outcome;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use definition::{
    is_schedule_input_source, load_schedules, JobParam, LineageId, ParamValue, ScheduleDefinition,
    ScheduleFile, LINEAGE_ID_PARAM,
};
pub use error::ConfigError;
pub use job::{JobState, LiveJob};
pub use outcome::{DefinitionOutcome, ImportTotals, ReconcileOutcome};
