//! HTTP adapter for the scheduler's REST control surface.
//!
//! Implements [`schedsync_reconcile::SchedulerControl`] over the scheduler's
//! REST endpoints. The endpoint shapes belong to the scheduler; this crate
//! only consumes them and maps failures into
//! [`schedsync_reconcile::SchedulerError`].

pub mod client;
pub mod error;
pub mod types;

pub use client::SchedulerApiClient;
pub use error::ApiClientError;
