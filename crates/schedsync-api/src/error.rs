use thiserror::Error;

/// Errors from constructing a [`crate::SchedulerApiClient`].
///
/// Runtime call failures are not represented here; those surface as
/// [`schedsync_reconcile::SchedulerError`] through the control contract.
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The underlying `reqwest::Client` could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL does not parse or cannot host the control
    /// endpoints.
    #[error("invalid scheduler base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
