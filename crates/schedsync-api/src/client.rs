//! HTTP client for the scheduler's REST control surface.
//!
//! Wraps `reqwest` with scheduler-specific error mapping and optional basic
//! auth. Use [`SchedulerApiClient::new`] for production or point the base
//! URL at a mock server in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use schedsync_core::{AppConfig, LiveJob, ScheduleDefinition};
use schedsync_reconcile::{CreateJobReply, SchedulerControl, SchedulerError};

use crate::error::ApiClientError;
use crate::types::{CreateJobRequest, RemoveJobRequest, WireJob};

/// Client for a scheduler's REST control surface.
pub struct SchedulerApiClient {
    client: Client,
    endpoints: Endpoints,
    credentials: Option<(String, String)>,
}

/// Control endpoints, resolved once at construction.
#[derive(Debug)]
struct Endpoints {
    pause: Url,
    resume: Url,
    jobs: Url,
    remove_job: Url,
    create_job: Url,
}

impl SchedulerApiClient {
    /// Creates a client for the scheduler at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("schedsync/0.1 (schedule-import)")
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // joining the endpoint paths appends to the base path rather than
        // replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| ApiClientError::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        let endpoint = |path: &str| -> Result<Url, ApiClientError> {
            base.join(path).map_err(|e| ApiClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })
        };

        Ok(Self {
            client,
            endpoints: Endpoints {
                pause: endpoint("scheduler/pause")?,
                resume: endpoint("scheduler/start")?,
                jobs: endpoint("scheduler/jobs")?,
                remove_job: endpoint("scheduler/removeJob")?,
                create_job: endpoint("scheduler/job")?,
            },
            credentials: None,
        })
    }

    /// Creates a client from application configuration, including
    /// credentials when both username and password are configured.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SchedulerApiClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiClientError> {
        let mut client = Self::new(&config.scheduler_base_url, config.request_timeout_secs)?;
        if let (Some(user), Some(pass)) = (&config.scheduler_username, &config.scheduler_password)
        {
            client = client.with_credentials(user, pass);
        }
        Ok(client)
    }

    /// Attaches basic-auth credentials sent with every request.
    #[must_use]
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.credentials {
            Some((user, pass)) => builder.basic_auth(user, Some(pass)),
            None => builder,
        }
    }

    /// Issues a body-less control POST and asserts a 2xx status.
    async fn control(&self, operation: &'static str, url: &Url) -> Result<(), SchedulerError> {
        let response = self
            .request(Method::POST, url.clone())
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(())
    }
}

fn transport(operation: &'static str, source: reqwest::Error) -> SchedulerError {
    SchedulerError::Transport {
        operation,
        source: Box::new(source),
    }
}

#[async_trait]
impl SchedulerControl for SchedulerApiClient {
    async fn pause(&self) -> Result<(), SchedulerError> {
        self.control("pause", &self.endpoints.pause).await
    }

    async fn resume(&self) -> Result<(), SchedulerError> {
        self.control("resume", &self.endpoints.resume).await
    }

    async fn list_jobs(&self) -> Result<Vec<LiveJob>, SchedulerError> {
        let operation = "listJobs";
        let response = self
            .request(Method::GET, self.endpoints.jobs.clone())
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|e| transport(operation, e))?;
        let jobs: Vec<WireJob> =
            serde_json::from_str(&body).map_err(|e| SchedulerError::InvalidResponse {
                operation,
                reason: e.to_string(),
            })?;
        Ok(jobs.into_iter().map(LiveJob::from).collect())
    }

    async fn remove_job(&self, job_id: &str) -> Result<(), SchedulerError> {
        let operation = "removeJob";
        let response = self
            .request(Method::POST, self.endpoints.remove_job.clone())
            .json(&RemoveJobRequest {
                job_id: job_id.to_owned(),
            })
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        Ok(())
    }

    async fn create_job(
        &self,
        definition: &ScheduleDefinition,
    ) -> Result<CreateJobReply, SchedulerError> {
        let operation = "createJob";
        tracing::debug!(input_path = %definition.input_path, "submitting schedule job");
        let response = self
            .request(Method::POST, self.endpoints.create_job.clone())
            .json(&CreateJobRequest::from(definition))
            .send()
            .await
            .map_err(|e| transport(operation, e))?;
        let status = response.status();
        if !status.is_success() {
            // Creation refusals are raised rather than returned in-band so
            // the reconciler's sanitized-retry path can see them.
            return Err(SchedulerError::Rejected {
                operation,
                status: status.as_u16(),
            });
        }
        let body = response.text().await.map_err(|e| transport(operation, e))?;
        let job_id = body.trim();
        Ok(CreateJobReply {
            status: status.as_u16(),
            job_id: (!job_id.is_empty()).then(|| job_id.to_owned()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SchedulerApiClient {
        SchedulerApiClient::new(base_url, 30).expect("client construction should not fail")
    }

    #[test]
    fn endpoints_join_the_base_path() {
        let client = test_client("http://localhost:8080/portal");
        assert_eq!(
            client.endpoints.pause.as_str(),
            "http://localhost:8080/portal/scheduler/pause"
        );
        assert_eq!(
            client.endpoints.resume.as_str(),
            "http://localhost:8080/portal/scheduler/start"
        );
        assert_eq!(
            client.endpoints.create_job.as_str(),
            "http://localhost:8080/portal/scheduler/job"
        );
    }

    #[test]
    fn trailing_slash_is_normalised() {
        let client = test_client("http://localhost:8080/");
        assert_eq!(
            client.endpoints.jobs.as_str(),
            "http://localhost:8080/scheduler/jobs"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SchedulerApiClient::new("not a url", 30);
        assert!(matches!(
            result,
            Err(ApiClientError::InvalidBaseUrl { .. })
        ));
    }
}
