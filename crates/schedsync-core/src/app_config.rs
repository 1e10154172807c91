use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the scheduler's REST control surface.
    pub scheduler_base_url: String,
    pub scheduler_username: Option<String>,
    pub scheduler_password: Option<String>,
    pub request_timeout_secs: u64,
    /// Default YAML schedule-definition file for the CLI.
    pub schedules_path: PathBuf,
    /// Whether matching live jobs are replaced rather than skipped.
    pub overwrite_existing: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("scheduler_base_url", &self.scheduler_base_url)
            .field("scheduler_username", &self.scheduler_username)
            .field(
                "scheduler_password",
                &self.scheduler_password.as_ref().map(|_| "[redacted]"),
            )
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("schedules_path", &self.schedules_path)
            .field("overwrite_existing", &self.overwrite_existing)
            .finish()
    }
}
