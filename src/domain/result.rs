//! Result type alias for Cabinet
//!
//! This module provides a convenient Result type alias that uses
//! [`CabinetError`] as the error type.

use super::errors::CabinetError;

/// Result type alias for Cabinet operations
///
/// # Examples
///
/// ```
/// use cabinet::domain::result::Result;
/// use cabinet::domain::errors::CabinetError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(CabinetError::Validation("email: is required".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, CabinetError>;
