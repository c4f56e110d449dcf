//! Status command implementation
//!
//! Shows the persisted session: who is signed in, with which role, which
//! menu entries that role unlocks and when the backend will consider the
//! access token expired.

use super::{open_context, EXIT_OK};
use crate::adapters::auth::claims::token_expiry;
use crate::core::AppContext;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Skip the accessible menu entries
    #[arg(long)]
    pub no_menu: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking session status");

        let context = match open_context(config_path).await {
            Ok(c) => c,
            Err(code) => return Ok(code),
        };

        println!("📊 Session Status");
        println!();
        Self::print_session(&context);

        if !self.no_menu && context.sessions().is_authenticated() {
            println!();
            println!("{:<20} {:<20}", "Menu", "Path");
            println!("{}", "-".repeat(40));
            for item in context.navigator().menu() {
                println!("{:<20} {:<20}", item.label, item.path);
            }
        }

        println!();
        Ok(EXIT_OK)
    }

    fn print_session(context: &AppContext) {
        let sessions = context.sessions();
        println!("  State: {}", sessions.state());
        println!("  Store: {:?}", context.config().storage.backend);

        let Some(user) = sessions.current_user() else {
            println!("  Not signed in.");
            println!("  Run 'cabinet login --email <EMAIL>' to start a session.");
            return;
        };

        println!("  User: {} <{}>", user.full_name(), user.email);
        println!("  Role: {}", user.role);

        let expiry = sessions
            .access_token()
            .and_then(|token| token_expiry(&token))
            .map(|at| at.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "Unknown".to_string());
        println!("  Token Expires: {expiry}");
    }
}
