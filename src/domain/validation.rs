//! Client-side form validation
//!
//! Submissions are checked before any request is sent. Every failing field
//! is collected so the caller can report the whole form at once.

use super::errors::CabinetError;
use super::result::Result;

/// Types that must pass client-side validation before being submitted
pub trait Validate {
    /// Checks the value for an update submission
    fn validate(&self) -> Result<()>;

    /// Checks the value for a create submission
    ///
    /// Defaults to [`Validate::validate`]; drafts with create-only
    /// requirements (e.g. an initial password) override it.
    fn validate_for_create(&self) -> Result<()> {
        self.validate()
    }
}

/// Collects field-level validation failures
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<(&'static str, String)>,
}

impl FormErrors {
    /// Creates an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an arbitrary failure for `field`
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    /// Field must be non-blank
    pub fn required(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    /// Field must be present
    pub fn required_some<T>(&mut self, field: &'static str, value: Option<&T>) {
        if value.is_none() {
            self.push(field, "is required");
        }
    }

    /// Field, when non-blank, must look like an email address
    pub fn email(&mut self, field: &'static str, value: &str) {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.push(field, "must be a valid email address");
        }
    }

    /// Field must contain at least `min` characters
    pub fn min_len(&mut self, field: &'static str, value: &str, min: usize) {
        if value.chars().count() < min {
            self.push(field, format!("must be at least {min} characters"));
        }
    }

    /// Numeric field must be strictly positive
    pub fn positive(&mut self, field: &'static str, value: f64) {
        if value <= 0.0 {
            self.push(field, "must be greater than zero");
        }
    }

    /// True when nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded failures as `(field, message)` pairs
    pub fn errors(&self) -> &[(&'static str, String)] {
        &self.errors
    }

    /// Turns the collected failures into a validation error
    pub fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            return Ok(());
        }

        let message = self
            .errors
            .iter()
            .map(|(field, msg)| format!("{field} {msg}"))
            .collect::<Vec<_>>()
            .join("; ");

        Err(CabinetError::Validation(message))
    }
}

/// Loose structural email check matching what the login and user forms accept
pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
