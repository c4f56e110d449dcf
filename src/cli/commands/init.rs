//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG, EXIT_FATAL, EXIT_OK};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cabinet.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Cabinet configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Set api.base_url in {} to your practice server", self.output);
                println!("  2. Validate configuration: cabinet validate-config");
                println!("  3. Sign in: cabinet login --email <EMAIL>");
                println!("     (the password can come from CABINET_PASSWORD or a .env file)");
                println!();
                Ok(EXIT_OK)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Cabinet Configuration File
# Medical practice administration client

environment = "development"

[application]
log_level = "info"

[api]
base_url = "http://localhost:8080/api"

[session]
timeout_seconds = 1800

[storage]
backend = "file"
path = ".cabinet/session.json"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Cabinet Configuration File
# Medical practice administration client
#
# Every value below is the default. Values of the form ${VAR} are read
# from the environment (or a .env file) when the file is loaded, and any
# CABINET_* variable overrides the matching setting.

# ============================================================================
# Environment
# ============================================================================
# development | staging | production
# TLS verification cannot be disabled in production.
environment = "development"

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Backend API
# ============================================================================
[api]
# Base URL every endpoint is resolved against
# base_url = "${CABINET_API_URL}"
base_url = "http://localhost:8080/api"

# Whole-request timeout in seconds
timeout_seconds = 30

# Connection establishment timeout in seconds
connect_timeout_seconds = 10

# TLS/SSL verification
tls_verify = true

# Optional: additional trusted CA certificate (PEM)
# tls_ca_cert = "/path/to/ca.crt"

# ============================================================================
# Session
# ============================================================================
[session]
# Wall-clock session lifetime in seconds. Activity does not extend it.
timeout_seconds = 1800

# ============================================================================
# Session Storage
# ============================================================================
[storage]
# file: survives restarts | memory: lost when the process exits
backend = "file"
path = ".cabinet/session.json"

# Entry names of the three persisted session values
token_key = "auth_token"
refresh_token_key = "refresh_token"
user_key = "current_user"

# ============================================================================
# Notifications
# ============================================================================
[notifications]
# Display duration in milliseconds; errors stay 1.5x longer
duration_ms = 4000

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable local JSON file logging
local_enabled = false

# Local log directory
local_path = "logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
