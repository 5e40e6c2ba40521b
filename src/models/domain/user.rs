use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Permission level of an account. Roles are flat: an admin does not
/// implicitly satisfy a standard-user check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum UserRole {
    #[serde(rename = "STANDARD_USER")]
    Standard,
    #[serde(rename = "ADMIN_USER")]
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Standard => "STANDARD_USER",
            UserRole::Admin => "ADMIN_USER",
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        UserRole::Standard
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    /// bcrypt hash; carries its own salt.
    pub password_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(
        first_name: &str,
        last_name: &str,
        username: &str,
        email: &str,
        role: UserRole,
        password_hash: String,
    ) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role,
            password_hash,
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, role: UserRole) -> Self {
        let hash = bcrypt::hash("password123", crate::auth::password::MIN_BCRYPT_COST)
            .expect("hashing with a valid cost succeeds");
        User::new(
            "Test",
            "User",
            username,
            &format!("{}@example.com", username),
            role,
            hash,
        )
    }
}
