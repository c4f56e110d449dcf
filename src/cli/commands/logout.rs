//! Logout command implementation

use super::{open_context, EXIT_OK};
use clap::Args;

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {}

impl LogoutArgs {
    /// Execute the logout command
    ///
    /// Signing out without a session is not an error.
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let context = match open_context(config_path).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        match context.sessions().current_user() {
            Some(user) => {
                context.sessions().logout();
                println!("👋 Signed out {}", user.email);
            }
            None => println!("Not signed in"),
        }
        Ok(EXIT_OK)
    }
}
