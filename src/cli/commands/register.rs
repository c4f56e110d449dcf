//! Register command implementation
//!
//! Self-service account creation. On success the new account is signed in
//! just like after `login`.

use super::{open_context, report_failure, EXIT_CONFIG, EXIT_OK};
use crate::config::secret_string;
use crate::domain::{RegistrationRequest, Role};
use clap::Args;

/// Arguments for the register command
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(short, long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub last_name: String,

    /// Role requested for the account (admin, clinician, secretary, patient)
    #[arg(long, default_value = "patient")]
    pub role: Role,

    #[arg(long)]
    pub phone: Option<String>,

    /// Account password
    #[arg(short, long, env = "CABINET_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Password confirmation, defaults to the password
    #[arg(long)]
    pub confirm_password: Option<String>,
}

impl RegisterArgs {
    fn request(&self) -> Option<RegistrationRequest> {
        let password = self.password.clone()?;
        let confirmation = self
            .confirm_password
            .clone()
            .unwrap_or_else(|| password.clone());

        Some(RegistrationRequest {
            email: self.email.trim().to_string(),
            password: secret_string(password),
            password_confirmation: secret_string(confirmation),
            last_name: self.last_name.trim().to_string(),
            first_name: self.first_name.trim().to_string(),
            role: self.role,
            phone: self.phone.clone(),
        })
    }

    /// Execute the register command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(email = %self.email, role = %self.role, "Registering account");

        let Some(request) = self.request() else {
            println!("❌ No password given");
            println!("   Use --password or set CABINET_PASSWORD");
            return Ok(EXIT_CONFIG);
        };

        let context = match open_context(config_path).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match context.sessions().register(&request).await {
            Ok(user) => {
                let landing = context.navigator().after_login();
                println!("✅ Account created for {} ({})", user.full_name(), user.role);
                println!("   Landing page: {}", landing.location());
                Ok(EXIT_OK)
            }
            Err(e) => Ok(report_failure("Registration", &e)),
        }
    }
}
