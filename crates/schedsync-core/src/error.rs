use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read schedule file {path}: {source}")]
    ScheduleFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schedule file: {0}")]
    ScheduleFileParse(#[from] serde_yaml::Error),

    #[error("{0}")]
    Validation(String),
}
