//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Cabinet configuration file.

use super::{EXIT_CONFIG, EXIT_OK};
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loading already validates, so a load failure and an invalid value
    /// are reported the same way.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                println!();
                return Ok(EXIT_CONFIG);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Environment: {:?}", config.environment);
        println!("  Log Level: {}", config.application.log_level);
        println!("  API: {}", config.api.base_url);
        println!("  Request Timeout: {}s", config.api.timeout_seconds);
        println!("  TLS Verify: {}", config.api.tls_verify);
        println!("  Session Timeout: {}s", config.session.timeout_seconds);
        println!("  Session Store: {:?}", config.storage.backend);
        println!(
            "  Storage Keys: {}, {}, {}",
            config.storage.token_key, config.storage.refresh_token_key, config.storage.user_key
        );
        println!("  File Logging: {}", config.logging.local_enabled);
        println!();
        Ok(EXIT_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]\ntimeout_seconds = 600").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        assert_eq!(ValidateArgs {}.execute(&path).await.unwrap(), EXIT_OK);
    }

    #[tokio::test]
    async fn test_invalid_value() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[session]\ntimeout_seconds = 0").unwrap();
        let path = file.path().to_string_lossy().into_owned();

        assert_eq!(ValidateArgs {}.execute(&path).await.unwrap(), EXIT_CONFIG);
    }
}
