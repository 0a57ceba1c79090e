use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

pub const USERNAME_MAX_LENGTH: usize = 150;

/// User entity - the identity that owns posts and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn author(&self) -> Author {
        Author {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

/// Data needed to insert a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(username: String, email: Option<String>, password_hash: String) -> Self {
        Self {
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Public projection of a user, embedded in posts and comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// Usernames are at most 150 characters of letters, digits and `@.+-_`.
pub fn validate_username(username: &str, errors: &mut FieldErrors) {
    if username.is_empty() {
        errors.add("username", "This field is required.");
    } else if username.chars().count() > USERNAME_MAX_LENGTH {
        errors.add(
            "username",
            format!("Ensure this value has at most {USERNAME_MAX_LENGTH} characters."),
        );
    } else if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        errors.add(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        );
    }
}
