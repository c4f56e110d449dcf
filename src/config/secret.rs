//! Secret handling for passwords and session tokens
//!
//! Passwords typed at login and the access/refresh tokens issued by the
//! backend are wrapped in `secrecy::Secret`, so they are zeroized on drop,
//! redacted in `Debug` output and only readable through `expose_secret()`.
//!
//! # Example
//!
//! ```rust
//! use cabinet::config::{secret_string, SecretString};
//! use secrecy::ExposeSecret;
//!
//! let token: SecretString = secret_string("eyJhbGciOi...".to_string());
//! assert_eq!(token.expose_secret().as_ref(), "eyJhbGciOi...");
//!
//! // Debug output is redacted
//! assert!(!format!("{token:?}").contains("eyJ"));
//! ```

use secrecy::{CloneableSecret, DebugSecret, ExposeSecret, Secret, SerializableSecret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Newtype wrapper for String that implements the required traits for Secret
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SecretValue(String);

impl CloneableSecret for SecretValue {}
impl DebugSecret for SecretValue {}
impl SerializableSecret for SecretValue {}

impl From<String> for SecretValue {
    fn from(s: String) -> Self {
        SecretValue(s)
    }
}

impl From<&str> for SecretValue {
    fn from(s: &str) -> Self {
        SecretValue(s.to_string())
    }
}

impl PartialEq for SecretValue {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl PartialEq<str> for SecretValue {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl AsRef<str> for SecretValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl SecretValue {
    /// Check if the secret value is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of characters in the secret
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Serialize for SecretValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SecretValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(SecretValue)
    }
}

/// Type alias for a secret string
pub type SecretString = Secret<SecretValue>;

/// Helper function to create a SecretString from a String
#[inline]
pub fn secret_string(value: String) -> SecretString {
    Secret::new(SecretValue::from(value))
}

/// Helper function to create an optional SecretString from an optional String
#[inline]
pub fn secret_string_opt(value: Option<String>) -> Option<SecretString> {
    value.map(secret_string)
}

/// Compares two secrets without exposing either outside this call
///
/// Plain equality; not constant-time.
pub fn secrets_match(a: &SecretString, b: &SecretString) -> bool {
    a.expose_secret() == b.expose_secret()
}

/// Builds an `Authorization` header value from an access token
pub fn bearer_header(token: &SecretString) -> String {
    format!("Bearer {}", token.expose_secret().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_string_creation() {
        let secret = secret_string("test-password".to_string());
        assert_eq!(secret.expose_secret(), "test-password");
    }

    #[test]
    fn test_secret_string_opt() {
        assert!(secret_string_opt(Some("p".to_string())).is_some());
        assert!(secret_string_opt(None).is_none());
    }

    #[test]
    fn test_secret_debug_redacted() {
        let secret = secret_string("sensitive-token".to_string());
        let debug_output = format!("{secret:?}");

        assert!(!debug_output.contains("sensitive-token"));
        assert!(debug_output.contains("REDACTED") || debug_output.contains("Secret"));
    }

    #[test]
    fn test_secrets_match() {
        let a = secret_string("token-a".to_string());
        let b = secret_string("token-a".to_string());
        let c = secret_string("token-c".to_string());
        assert!(secrets_match(&a, &b));
        assert!(!secrets_match(&a, &c));
    }

    #[test]
    fn test_bearer_header() {
        let token = secret_string("abc.def.ghi".to_string());
        assert_eq!(bearer_header(&token), "Bearer abc.def.ghi");
    }

    #[test]
    fn test_secret_serde_round_trip_in_payload() {
        #[derive(Serialize, Deserialize)]
        struct Payload {
            #[serde(rename = "refreshToken")]
            refresh_token: SecretString,
        }

        let json = serde_json::to_string(&Payload {
            refresh_token: secret_string("r-123".to_string()),
        })
        .unwrap();
        assert_eq!(json, r#"{"refreshToken":"r-123"}"#);

        let parsed: Payload = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.refresh_token.expose_secret(), "r-123");
    }
}
