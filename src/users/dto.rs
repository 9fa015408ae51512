use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::ApiError;
use crate::users::repo_types::{NewUser, User};

/// Request body for register and update.
///
/// Fields are optional at the serde level so that a missing field is reported
/// as a validation error with a readable message instead of a decoder rejection.
#[derive(Debug, Default, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex =
            Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles");
    }
    EMAIL_RE.is_match(email)
}

fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::Validation(format!("{field} is required"))),
    }
}

impl UserPayload {
    /// Validates the mutable fields. Any `id` on the payload is dropped.
    pub fn into_new_user(self) -> Result<NewUser, ApiError> {
        let name = required(self.name, "name")?;
        let email = required(self.email, "email")?;
        if !is_valid_email(&email) {
            return Err(ApiError::Validation("email is invalid".into()));
        }
        let password = required(self.password, "password")?;
        Ok(NewUser {
            name,
            email,
            password,
        })
    }

    /// Validates a full replacement record; `id` must be present.
    pub fn into_user(mut self) -> Result<User, ApiError> {
        let id = self
            .id
            .take()
            .ok_or_else(|| ApiError::Validation("id is required".into()))?;
        Ok(self.into_new_user()?.with_id(id))
    }
}
