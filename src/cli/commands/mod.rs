//! CLI command implementations
//!
//! Every command returns `anyhow::Result<i32>` where the integer is the
//! process exit code:
//!
//! | Code | Meaning |
//! |------|---------|
//! | 0 | Success |
//! | 2 | Configuration error |
//! | 3 | Authentication or authorization failure |
//! | 4 | Backend unreachable |
//! | 5 | Any other failure |

pub mod dashboard;
pub mod init;
pub mod login;
pub mod logout;
pub mod records;
pub mod register;
pub mod status;
pub mod validate;

use crate::config::load_config;
use crate::core::AppContext;
use crate::domain::{ApiError, AuthError, CabinetError};

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_AUTH: i32 = 3;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Maps a library error to the exit code reported for it
pub fn exit_code(error: &CabinetError) -> i32 {
    match error {
        CabinetError::Configuration(_) => EXIT_CONFIG,
        CabinetError::Auth(AuthError::NetworkUnreachable(_))
        | CabinetError::Api(ApiError::NetworkUnreachable(_)) => EXIT_CONNECTION,
        CabinetError::Auth(_)
        | CabinetError::Api(ApiError::Unauthenticated)
        | CabinetError::Api(ApiError::Forbidden) => EXIT_AUTH,
        _ => EXIT_FATAL,
    }
}

/// Prints a failed operation and returns its exit code
pub(crate) fn report_failure(action: &str, error: &CabinetError) -> i32 {
    tracing::error!(error = %error, action, "Command failed");
    println!("❌ {action} failed");
    println!("   {}", error.user_message());
    exit_code(error)
}

/// Loads the configuration and wires the application context
///
/// A persisted session is restored before the context is returned.
/// Failures are printed and turned into an exit code.
pub(crate) async fn open_context(config_path: &str) -> Result<AppContext, i32> {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            println!("❌ Failed to load configuration file");
            println!("   Error: {e}");
            return Err(EXIT_CONFIG);
        }
    };

    let context = AppContext::from_config(config)
        .map_err(|e| report_failure("Client initialization", &e))?;

    // The listener only matters while the process lives
    let (_restored, _listener) = context
        .start()
        .map_err(|e| report_failure("Session restore", &e))?;

    Ok(context)
}

/// Exit code for commands that need a signed-in user, if there is none
pub(crate) fn require_session(context: &AppContext) -> Option<i32> {
    if context.sessions().is_authenticated() {
        return None;
    }
    println!("🔒 Not signed in");
    println!("   Run 'cabinet login --email <EMAIL>' first");
    Some(EXIT_AUTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StorageError;
    use test_case::test_case;

    #[test_case(CabinetError::Configuration("x".into()), EXIT_CONFIG ; "configuration")]
    #[test_case(AuthError::InvalidCredentials.into(), EXIT_AUTH ; "bad credentials")]
    #[test_case(ApiError::Forbidden.into(), EXIT_AUTH ; "forbidden")]
    #[test_case(ApiError::NetworkUnreachable("refused".into()).into(), EXIT_CONNECTION ; "api offline")]
    #[test_case(AuthError::NetworkUnreachable("refused".into()).into(), EXIT_CONNECTION ; "auth offline")]
    #[test_case(ApiError::NotFound.into(), EXIT_FATAL ; "not found")]
    #[test_case(StorageError::Write("disk full".into()).into(), EXIT_FATAL ; "storage")]
    fn test_exit_code(error: CabinetError, expected: i32) {
        assert_eq!(exit_code(&error), expected);
    }

    #[tokio::test]
    async fn test_open_context_missing_config() {
        let result = open_context("/nonexistent/cabinet.toml").await;
        assert_eq!(result.err(), Some(EXIT_CONFIG));
    }
}
