/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication
 * handlers. These types are shared across register, login, and get_me.
 */

use serde::{Deserialize, Serialize};

use crate::shared::account::AccountSummary;
use crate::shared::error::{require, SharedError};

/// Shortest password accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct RegisterRequest {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Login email, matched case-insensitively
    #[serde(default)]
    pub email: String,
    /// Plain password (hashed before storage)
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub institution: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("name", &self.name, "Name, email and password are required")?;
        require("email", &self.email, "Name, email and password are required")?;
        require("password", &self.password, "Name, email and password are required")?;

        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "Invalid email format"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SharedError::validation(
                "password",
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            ));
        }
        Ok(())
    }
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), SharedError> {
        require("email", &self.email, "Email and password are required")?;
        require("password", &self.password, "Email and password are required")
    }
}

/// Authentication response
///
/// Returned by register and login: a bearer token plus the account it is
/// bound to.
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    /// JWT token for authentication
    pub token: String,
    pub user: AccountSummary,
}
