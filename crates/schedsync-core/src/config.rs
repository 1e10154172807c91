use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let scheduler_base_url = require("SCHEDSYNC_SCHEDULER_BASE_URL")?;

    let env = parse_environment(&or_default("SCHEDSYNC_ENV", "development"));
    let log_level = or_default("SCHEDSYNC_LOG_LEVEL", "info");
    let scheduler_username = lookup("SCHEDSYNC_SCHEDULER_USERNAME").ok();
    let scheduler_password = lookup("SCHEDSYNC_SCHEDULER_PASSWORD").ok();
    let request_timeout_secs = parse_u64("SCHEDSYNC_REQUEST_TIMEOUT_SECS", "30")?;
    let schedules_path = PathBuf::from(or_default(
        "SCHEDSYNC_SCHEDULES_PATH",
        "./config/schedules.yaml",
    ));
    let overwrite_existing = parse_bool("SCHEDSYNC_OVERWRITE_EXISTING", "false")?;

    Ok(AppConfig {
        env,
        log_level,
        scheduler_base_url,
        scheduler_username,
        scheduler_password,
        request_timeout_secs,
        schedules_path,
        overwrite_existing,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    /// Returns a map with all required env vars populated with valid defaults.
    fn full_env<'a>() -> HashMap<&'a str, &'a str> {
        let mut m = HashMap::new();
        m.insert("SCHEDSYNC_SCHEDULER_BASE_URL", "http://localhost:8080");
        m
    }

    #[test]
    fn parse_environment_production() {
        assert_eq!(parse_environment("production"), Environment::Production);
    }

    #[test]
    fn parse_environment_unknown_defaults_to_development() {
        assert_eq!(parse_environment("unknown"), Environment::Development);
    }

    #[test]
    fn build_app_config_fails_without_base_url() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "SCHEDSYNC_SCHEDULER_BASE_URL"),
            "expected MissingEnvVar(SCHEDSYNC_SCHEDULER_BASE_URL), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_timeout() {
        let mut map = full_env();
        map.insert("SCHEDSYNC_REQUEST_TIMEOUT_SECS", "soon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SCHEDSYNC_REQUEST_TIMEOUT_SECS"),
            "expected InvalidEnvVar(SCHEDSYNC_REQUEST_TIMEOUT_SECS), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_fails_with_invalid_overwrite_flag() {
        let mut map = full_env();
        map.insert("SCHEDSYNC_OVERWRITE_EXISTING", "yes");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "SCHEDSYNC_OVERWRITE_EXISTING"),
            "expected InvalidEnvVar(SCHEDSYNC_OVERWRITE_EXISTING), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_succeeds_with_defaults() {
        let map = full_env();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.env, Environment::Development);
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.scheduler_base_url, "http://localhost:8080");
        assert!(cfg.scheduler_username.is_none());
        assert_eq!(cfg.request_timeout_secs, 30);
        assert!(!cfg.overwrite_existing);
    }

    #[test]
    fn build_app_config_reads_credentials_and_overrides() {
        let mut map = full_env();
        map.insert("SCHEDSYNC_ENV", "production");
        map.insert("SCHEDSYNC_SCHEDULER_USERNAME", "admin");
        map.insert("SCHEDSYNC_SCHEDULER_PASSWORD", "secret");
        map.insert("SCHEDSYNC_OVERWRITE_EXISTING", "true");
        let cfg = build_app_config(lookup_from_map(&map)).expect("config");
        assert_eq!(cfg.env, Environment::Production);
        assert_eq!(cfg.scheduler_username.as_deref(), Some("admin"));
        assert_eq!(cfg.scheduler_password.as_deref(), Some("secret"));
        assert!(cfg.overwrite_existing);
    }
}
