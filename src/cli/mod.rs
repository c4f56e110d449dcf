//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Cabinet using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Cabinet - Medical Practice Administration Client
#[derive(Parser, Debug)]
#[command(name = "cabinet")]
#[command(version, about, long_about = None)]
#[command(author = "Cabinet Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cabinet.toml", env = "CABINET_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "CABINET_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new configuration file
    Init(commands::init::InitArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Sign in and persist the session
    Login(commands::login::LoginArgs),

    /// Create an account and sign in
    Register(commands::register::RegisterArgs),

    /// End the persisted session
    Logout(commands::logout::LogoutArgs),

    /// Show the current session, role and menu
    Status(commands::status::StatusArgs),

    /// List records of a collection
    List(commands::records::ListArgs),

    /// Show one record as JSON
    Show(commands::records::ShowArgs),

    /// Delete one record
    Delete(commands::records::DeleteArgs),

    /// Show the dashboard counters
    Dashboard(commands::dashboard::DashboardArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use commands::records::ResourceKind;

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["cabinet", "status"]);
        assert_eq!(cli.config, "cabinet.toml");
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["cabinet", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cabinet", "--log-level", "debug", "logout"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::Logout(_)));
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::parse_from([
            "cabinet",
            "login",
            "--email",
            "admin@x.com",
            "--password",
            "secret",
        ]);
        match cli.command {
            Commands::Login(args) => {
                assert_eq!(args.email, "admin@x.com");
                assert_eq!(args.password.as_deref(), Some("secret"));
            }
            other => panic!("expected login, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from([
            "cabinet", "list", "patients", "--page", "1", "--size", "20", "--search", "dur",
        ]);
        match cli.command {
            Commands::List(args) => {
                assert_eq!(args.resource, ResourceKind::Patients);
                assert_eq!(args.page, Some(1));
                assert_eq!(args.size, Some(20));
                assert_eq!(args.search.as_deref(), Some("dur"));
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_show_and_delete() {
        let cli = Cli::parse_from(["cabinet", "show", "appointments", "12"]);
        assert!(matches!(
            cli.command,
            Commands::Show(ref args) if args.resource == ResourceKind::Appointments && args.id == 12
        ));

        let cli = Cli::parse_from(["cabinet", "delete", "users", "3"]);
        assert!(matches!(cli.command, Commands::Delete(ref args) if args.id == 3));
    }

    #[test]
    fn test_cli_parse_register_role() {
        let cli = Cli::parse_from([
            "cabinet",
            "register",
            "--email",
            "new@x.com",
            "--first-name",
            "Marie",
            "--last-name",
            "Curie",
            "--role",
            "medecin",
        ]);
        match cli.command {
            Commands::Register(args) => assert_eq!(args.role, crate::domain::Role::Clinician),
            other => panic!("expected register, got {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_resource() {
        assert!(Cli::try_parse_from(["cabinet", "list", "invoices"]).is_err());
    }
}
