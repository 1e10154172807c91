//! Reconciliation of desired schedule definitions against a live scheduler.
//!
//! The entry point is [`import_schedules`], which pauses the scheduler,
//! walks the desired definitions in order, decides per definition whether to
//! create, replace, or skip, and resumes the scheduler when the batch is
//! done. Per-definition failures are isolated; only the inability to pause
//! or resume the scheduler itself is fatal.

pub mod error;
pub mod matcher;
pub mod params;
pub mod reconcile;
pub mod sanitize;
pub mod scheduler;
pub mod session;

pub use error::{ReconcileError, SchedulerError};
pub use matcher::find_existing;
pub use params::{lineage_key, param_map};
pub use reconcile::import_schedules;
pub use sanitize::sanitize;
pub use scheduler::{CreateJobReply, SchedulerControl};
pub use session::ImportSession;
