use std::{fmt, sync::Arc};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    client::storage::{SessionStore, StorageError},
    models::{domain::UserRole, dto::response::UserDto},
};

pub const TOKEN_KEY: &str = "token";
pub const USER_DATA_KEY: &str = "userData";
pub const ERROR_KEY: &str = "error";

/// Opaque bearer token. Only the server can tell whether it is still valid.
#[derive(Clone)]
pub struct Credential(SecretString);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Snapshot of the logged-in account taken at login. Good for deciding what
/// to show; the server never trusts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaim {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl SessionClaim {
    pub fn new(id: &str, username: &str, role: UserRole) -> Self {
        Self {
            id: id.to_string(),
            username: username.to_string(),
            role,
            email: None,
            first_name: None,
            last_name: None,
        }
    }
}

impl From<UserDto> for SessionClaim {
    fn from(user: UserDto) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            email: Some(user.email),
            first_name: Some(user.first_name),
            last_name: Some(user.last_name),
        }
    }
}

/// Explicit session context handed to the gate, the API client and view
/// decisions, in place of reading ambient storage.
///
/// Token and claim are always written and cleared together.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub fn credential(&self) -> Result<Option<Credential>, StorageError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|token| !token.is_empty())
            .map(Credential::new))
    }

    /// The cached claim. Unparseable user data reads as no claim.
    pub fn claim(&self) -> Result<Option<SessionClaim>, StorageError> {
        let Some(raw) = self.store.get(USER_DATA_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str::<SessionClaim>(&raw) {
            Ok(claim) => Ok(Some(claim)),
            Err(e) => {
                log::warn!("Ignoring unreadable session claim: {}", e);
                Ok(None)
            }
        }
    }

    /// True when the last session ended because the server rejected it.
    pub fn had_auth_error(&self) -> Result<bool, StorageError> {
        Ok(self.store.get(ERROR_KEY)?.as_deref() == Some("true"))
    }

    pub fn establish(&self, token: &str, claim: &SessionClaim) -> Result<(), StorageError> {
        let user_data = serde_json::to_string(claim)?;
        self.store.set(TOKEN_KEY, token)?;
        self.store.set(USER_DATA_KEY, &user_data)?;
        self.store.set(ERROR_KEY, "false")?;
        log::debug!("Session established for '{}'", claim.username);
        Ok(())
    }

    /// Drops the credential and claim after the server rejected them and
    /// records the failure. Repeating it leaves the same state.
    pub fn invalidate(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_DATA_KEY)?;
        self.store.set(ERROR_KEY, "true")?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), StorageError> {
        self.store.remove(TOKEN_KEY)?;
        self.store.remove(USER_DATA_KEY)?;
        self.store.remove(ERROR_KEY)?;
        Ok(())
    }
}
