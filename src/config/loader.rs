//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CabinetConfig, Environment, StorageBackend};
use crate::domain::errors::CabinetError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CabinetConfig
/// 4. Applies environment variable overrides (CABINET_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is unset
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cabinet::config::loader::load_config;
///
/// let config = load_config("cabinet.toml").expect("Failed to load config");
/// println!("API: {}", config.api.base_url);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CabinetConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CabinetError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CabinetError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    load_config_str(&contents)
}

/// Loads configuration from TOML text
///
/// Same pipeline as [`load_config`] minus the file read.
pub fn load_config_str(contents: &str) -> Result<CabinetConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: CabinetConfig = toml::from_str(&contents)
        .map_err(|e| CabinetError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        CabinetError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_pattern();
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(CabinetError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn parse_override<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CabinetError::Configuration(format!("Invalid value '{value}' for environment variable {name}"))
    })
}

/// Applies environment variable overrides using CABINET_* prefix
///
/// Environment variables follow the pattern: CABINET_<SECTION>_<KEY>
/// For example: CABINET_API_BASE_URL, CABINET_SESSION_TIMEOUT_SECONDS
fn apply_env_overrides(config: &mut CabinetConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("CABINET_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = var("CABINET_ENVIRONMENT") {
        config.environment = match val.to_lowercase().as_str() {
            "development" => Environment::Development,
            "staging" => Environment::Staging,
            "production" => Environment::Production,
            _ => {
                return Err(CabinetError::Configuration(format!(
                    "Invalid CABINET_ENVIRONMENT '{val}'. Must be one of: development, staging, production"
                )))
            }
        };
    }

    // API overrides
    if let Some(val) = var("CABINET_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = var("CABINET_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = parse_override("CABINET_API_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = var("CABINET_API_CONNECT_TIMEOUT_SECONDS") {
        config.api.connect_timeout_seconds =
            parse_override("CABINET_API_CONNECT_TIMEOUT_SECONDS", &val)?;
    }
    if let Some(val) = var("CABINET_API_TLS_VERIFY") {
        config.api.tls_verify = parse_override("CABINET_API_TLS_VERIFY", &val)?;
    }
    if let Some(val) = var("CABINET_API_TLS_CA_CERT") {
        config.api.tls_ca_cert = Some(val);
    }

    // Session overrides
    if let Some(val) = var("CABINET_SESSION_TIMEOUT_SECONDS") {
        config.session.timeout_seconds = parse_override("CABINET_SESSION_TIMEOUT_SECONDS", &val)?;
    }

    // Storage overrides
    if let Some(val) = var("CABINET_STORAGE_BACKEND") {
        config.storage.backend = match val.to_lowercase().as_str() {
            "file" => StorageBackend::File,
            "memory" => StorageBackend::Memory,
            _ => {
                return Err(CabinetError::Configuration(format!(
                    "Invalid CABINET_STORAGE_BACKEND '{val}'. Must be one of: file, memory"
                )))
            }
        };
    }
    if let Some(val) = var("CABINET_STORAGE_PATH") {
        config.storage.path = val;
    }

    // Notification overrides
    if let Some(val) = var("CABINET_NOTIFICATIONS_DURATION_MS") {
        config.notifications.duration_ms =
            parse_override("CABINET_NOTIFICATIONS_DURATION_MS", &val)?;
    }

    // Logging overrides
    if let Some(val) = var("CABINET_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("CABINET_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("CABINET_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CABINET_TEST_SUBST_URL", "https://cabinet.example.com/api");
        let input = "base_url = \"${CABINET_TEST_SUBST_URL}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "base_url = \"https://cabinet.example.com/api\"");
        std::env::remove_var("CABINET_TEST_SUBST_URL");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CABINET_TEST_MISSING_VAR");
        let input = "path = \"${CABINET_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CABINET_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("CABINET_TEST_COMMENTED");
        let input = "# base_url = \"${CABINET_TEST_COMMENTED}\"\nlog_level = \"info\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-cabinet.toml");
        assert!(matches!(result, Err(CabinetError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
environment = "staging"

[application]
log_level = "debug"

[api]
base_url = "https://cabinet.example.com/api"
timeout_seconds = 15

[session]
timeout_seconds = 900

[storage]
backend = "memory"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.environment, Environment::Staging);
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.base_url, "https://cabinet.example.com/api");
        assert_eq!(config.api.timeout_seconds, 15);
        assert_eq!(config.session.timeout_seconds, 900);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.token_key, "auth_token");
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let err = load_config_str("[session]\ntimeout_seconds = 0\n").unwrap_err();
        assert!(err.to_string().contains("session.timeout_seconds"));
    }

    #[test]
    fn test_parse_override_reports_variable() {
        let err = parse_override::<u64>("CABINET_SESSION_TIMEOUT_SECONDS", "soon").unwrap_err();
        assert!(err.to_string().contains("CABINET_SESSION_TIMEOUT_SECONDS"));
        assert!(parse_override::<bool>("X", " true ").unwrap());
    }
}
