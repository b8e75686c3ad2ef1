use chrono::{DateTime, Utc};

/// Login credential linked to one family account
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Trimmed and lowercased, unique across users
    pub email: String,
    pub password_hash: String,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn generate_id() -> String {
        format!("user::{}", uuid::Uuid::new_v4().simple())
    }

    pub fn normalize_email(email: &str) -> String {
        email.trim().to_lowercase()
    }
}
