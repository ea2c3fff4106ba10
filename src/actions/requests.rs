//! Request payloads, client-side preconditions, and response shapes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config::SecretString;
use crate::session::UserProfile;

/// Gender sent when the caller leaves it out.
pub const DEFAULT_GENDER: &str = "unspecified";
pub const MIN_PASSWORD_LEN: usize = 6;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn looks_like_email(value: &str) -> bool {
    value.contains('@')
}

/// Fields for `POST /auth/register`.
#[derive(Debug, Clone, Default)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub gender: Option<String>,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    gender: &'a str,
}

impl RegisterRequest {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: SecretString::new(password),
            gender: None,
        }
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Client-side checks run before any request is sent.
    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.username) {
            return Err("Username should not be empty".to_string());
        }
        if is_blank(&self.email) {
            return Err("Email should not be empty".to_string());
        }
        if !looks_like_email(&self.email) {
            return Err("Please enter a valid email".to_string());
        }
        if self.password.is_empty() {
            return Err("Password should not be empty".to_string());
        }
        if self.password.expose().chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> impl Serialize + '_ {
        RegisterBody {
            username: self.username.trim(),
            email: self.email.trim(),
            password: self.password.expose(),
            gender: self
                .gender
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .unwrap_or(DEFAULT_GENDER),
        }
    }
}

/// Fields for `POST /auth/login`.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::new(password),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err("Please enter both email and password".to_string());
        }
        if !looks_like_email(&self.email) {
            return Err("Please enter a valid email address".to_string());
        }
        Ok(())
    }

    pub(crate) fn body(&self) -> impl Serialize + '_ {
        LoginBody {
            email: self.email.trim(),
            password: self.password.expose(),
        }
    }
}

/// Partial profile update for `PATCH /users/{id}`.
///
/// Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.gender.is_none() && self.extra.is_empty()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.username.as_deref().is_some_and(is_blank) {
            return Err("Username should not be empty".to_string());
        }
        if let Some(email) = self.email.as_deref() {
            if !looks_like_email(email) {
                return Err("Please enter a valid email".to_string());
            }
        }
        Ok(())
    }
}

/// Success payload of register and login.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthPayload {
    pub user: UserProfile,
    #[serde(default)]
    pub token: SecretString,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdatedUserPayload {
    #[serde(rename = "updatedUser")]
    pub updated_user: UserProfile,
}

/// Result of `GET /auth/verify`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionValidity {
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserProfile>,
}

fn default_valid() -> bool {
    true
}

impl Default for SessionValidity {
    fn default() -> Self {
        Self {
            valid: default_valid(),
            user: None,
        }
    }
}
