//! Read-only inspection of JWT access tokens
//!
//! The client never validates signatures; the backend does. The payload is
//! decoded only to display when the backend considers the token expired.

use crate::config::SecretString;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
    sub: Option<String>,
}

fn decode_claims(token: &SecretString) -> Option<Claims> {
    let raw: &str = token.expose_secret().as_ref();
    let payload = raw.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// `exp` claim of a JWT, if the token is a JWT carrying one
pub fn token_expiry(token: &SecretString) -> Option<DateTime<Utc>> {
    decode_claims(token)?
        .exp
        .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
}

/// `sub` claim of a JWT
pub fn token_subject(token: &SecretString) -> Option<String> {
    decode_claims(token)?.sub
}
