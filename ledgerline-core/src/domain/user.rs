//! User domain model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::result::{Result, Violations};

/// Longest admissible login
pub const MAX_LOGIN_LEN: usize = 20;

/// An account owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub email: String,
}

impl User {
    /// Validate field rules, collecting every violation
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.login, &self.email)
    }
}

/// Request to register a new user; the store assigns the id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub login: String,
    pub email: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        validate_profile(&self.login, &self.email)
    }
}

fn validate_profile(login: &str, email: &str) -> Result<()> {
    let mut violations = Violations::new();
    if login.is_empty() {
        violations.push("login.required", "login must not be empty");
    }
    if login.chars().count() > MAX_LOGIN_LEN {
        violations.push(
            "login.max_length",
            format!("login must not exceed {MAX_LOGIN_LEN} characters"),
        );
    }
    if email.is_empty() {
        violations.push("email.required", "email must not be empty");
    }
    violations.into_result()
}
