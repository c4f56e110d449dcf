//! Users, roles and authentication payloads

use super::ids::UserId;
use super::result::Result;
use super::validation::{FormErrors, Validate};
use crate::config::SecretString;
use chrono::NaiveDateTime;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Minimum password length accepted by the login form
pub const LOGIN_PASSWORD_MIN_LEN: usize = 6;

/// Minimum password length for new accounts
pub const ACCOUNT_PASSWORD_MIN_LEN: usize = 8;

/// Role issued by the backend with the user's identity
///
/// Wire values are the backend's (`ADMIN`, `MEDECIN`, `SECRETAIRE`,
/// `PATIENT`). The client never changes a role on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Practice administrator
    #[serde(rename = "ADMIN")]
    Admin,
    /// Physician
    #[serde(rename = "MEDECIN")]
    Clinician,
    /// Front-desk staff
    #[serde(rename = "SECRETAIRE")]
    Secretary,
    /// Patient account
    #[serde(rename = "PATIENT")]
    Patient,
}

impl Role {
    /// Every role, in display order
    pub const ALL: [Role; 4] = [Role::Admin, Role::Clinician, Role::Secretary, Role::Patient];

    /// Value the backend uses for this role
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Clinician => "MEDECIN",
            Role::Secretary => "SECRETAIRE",
            Role::Patient => "PATIENT",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Role::Admin => "admin",
            Role::Clinician => "clinician",
            Role::Secretary => "secretary",
            Role::Patient => "patient",
        };
        f.write_str(label)
    }
}

impl FromStr for Role {
    type Err = String;

    /// Accepts both the English names and the backend's wire values
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "clinician" | "medecin" => Ok(Role::Clinician),
            "secretary" | "secretaire" => Ok(Role::Secretary),
            "patient" => Ok(Role::Patient),
            other => Err(format!(
                "Unknown role '{other}'. Must be one of: admin, clinician, secretary, patient"
            )),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Authenticated identity as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub role: Role,
    #[serde(rename = "telephone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "actif", default = "default_true")]
    pub active: bool,
    #[serde(rename = "dateCreation", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(rename = "derniereConnexion", default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<NaiveDateTime>,
}

impl User {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Login form payload
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required("email", &self.email);
        form.email("email", &self.email);
        if self.password.expose_secret().char_count() < LOGIN_PASSWORD_MIN_LEN {
            form.push(
                "password",
                format!("must be at least {LOGIN_PASSWORD_MIN_LEN} characters"),
            );
        }
        form.into_result()
    }
}

/// Self-service registration payload
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: SecretString,
    /// Checked client-side, never sent
    #[serde(skip)]
    pub password_confirmation: SecretString,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub role: Role,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Validate for RegistrationRequest {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required("first_name", &self.first_name);
        form.required("last_name", &self.last_name);
        form.required("email", &self.email);
        form.email("email", &self.email);
        if self.password.expose_secret().char_count() < ACCOUNT_PASSWORD_MIN_LEN {
            form.push(
                "password",
                format!("must be at least {ACCOUNT_PASSWORD_MIN_LEN} characters"),
            );
        }
        if self.password.expose_secret() != self.password_confirmation.expose_secret() {
            form.push("password_confirmation", "does not match the password");
        }
        form.into_result()
    }
}

/// Response of the login, register and refresh endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: SecretString,
    #[serde(rename = "refreshToken", default)]
    pub refresh_token: Option<SecretString>,
    pub user: User,
}

/// Staff account form used by the user-management screens (admin only)
#[derive(Debug, Clone, Serialize)]
pub struct UserDraft {
    pub email: String,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub role: Role,
    #[serde(rename = "telephone", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Required on creation, optional on update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<SecretString>,
}

impl Validate for UserDraft {
    fn validate(&self) -> Result<()> {
        let mut form = FormErrors::new();
        form.required("first_name", &self.first_name);
        form.required("last_name", &self.last_name);
        form.required("email", &self.email);
        form.email("email", &self.email);
        if let Some(password) = &self.password {
            if password.expose_secret().char_count() < ACCOUNT_PASSWORD_MIN_LEN {
                form.push(
                    "password",
                    format!("must be at least {ACCOUNT_PASSWORD_MIN_LEN} characters"),
                );
            }
        }
        form.into_result()
    }

    fn validate_for_create(&self) -> Result<()> {
        if self.password.is_none() {
            let mut form = FormErrors::new();
            form.push("password", "is required");
            // Surface the other field errors alongside the missing password
            if let Err(crate::domain::CabinetError::Validation(rest)) = self.validate() {
                form.push("form", rest);
            }
            return form.into_result();
        }
        self.validate()
    }
}

/// Query parameters of the user list
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<Role>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}
