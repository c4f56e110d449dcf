//! Login command implementation

use super::{open_context, report_failure, EXIT_CONFIG, EXIT_OK};
use crate::config::secret_string;
use crate::domain::Credentials;
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Account password
    #[arg(short, long, env = "CABINET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl LoginArgs {
    /// Execute the login command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(email = %self.email, "Signing in");

        let Some(password) = self.password.clone() else {
            println!("❌ No password given");
            println!("   Use --password or set CABINET_PASSWORD");
            return Ok(EXIT_CONFIG);
        };
        let credentials = Credentials::new(self.email.trim(), secret_string(password));
        if credentials.password.expose_secret().is_empty() {
            println!("❌ Password cannot be empty");
            return Ok(EXIT_CONFIG);
        }

        let context = match open_context(config_path).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match context.sessions().login(&credentials).await {
            Ok(user) => {
                let landing = context.navigator().after_login();
                println!("✅ Signed in as {} ({})", user.full_name(), user.role);
                println!("   Landing page: {}", landing.location());
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Sign in", &e)),
        }
    }
}
