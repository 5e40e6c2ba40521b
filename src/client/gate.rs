//! Session/authorization gate.
//!
//! Pure decisions over the cached credential and claim plus response status
//! codes handed in by the caller. Nothing here touches the network, and
//! nothing here is enforcement: the API re-checks every protected call.

use thiserror::Error;

use crate::{
    client::{
        session::{Credential, Session, SessionClaim},
        storage::StorageError,
    },
    models::domain::UserRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GateError {
    #[error("Unauthorized. Please log in")]
    Unauthenticated,

    #[error("Your account does not have access to this")]
    Unauthorized,

    #[error("Your session has expired. Please log in again")]
    SessionExpired,

    /// The server rejected the credential but it is still stored locally.
    #[error("Your session has expired but could not be cleared. Please log out and log in again")]
    SessionNotCleared,
}

pub fn is_authenticated(claim: Option<&SessionClaim>) -> bool {
    claim.is_some_and(|c| !c.id.trim().is_empty())
}

/// Flat role match: an admin claim does not satisfy a standard-user check.
pub fn is_authorized(claim: Option<&SessionClaim>, required: UserRole) -> bool {
    match claim {
        Some(c) if is_authenticated(claim) => c.role == required,
        _ => false,
    }
}

pub fn authorize(claim: Option<&SessionClaim>, required: UserRole) -> Result<(), GateError> {
    if !is_authenticated(claim) {
        return Err(GateError::Unauthenticated);
    }
    if !is_authorized(claim, required) {
        return Err(GateError::Unauthorized);
    }
    Ok(())
}

/// The `Authorization` header value for a protected request, or
/// `Unauthenticated` when there is nothing to send.
pub fn guard_request(credential: Option<&Credential>) -> Result<String, GateError> {
    credential
        .map(Credential::bearer_header)
        .ok_or(GateError::Unauthenticated)
}

pub fn is_auth_rejection(status: u16) -> bool {
    status == 401 || status == 403
}

/// The gate bound to a session.
#[derive(Clone)]
pub struct Gate {
    session: Session,
}

impl Gate {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Unreadable storage counts as logged out.
    pub fn claim(&self) -> Option<SessionClaim> {
        self.session.claim().unwrap_or_else(|e| {
            log::warn!("Session storage unreadable: {}", e);
            None
        })
    }

    pub fn is_authenticated(&self) -> bool {
        is_authenticated(self.claim().as_ref())
    }

    pub fn is_authorized(&self, required: UserRole) -> bool {
        is_authorized(self.claim().as_ref(), required)
    }

    pub fn authorize(&self, required: UserRole) -> Result<(), GateError> {
        authorize(self.claim().as_ref(), required)
    }

    pub fn guard_request(&self) -> Result<String, GateError> {
        let credential = self.session.credential().unwrap_or_else(|e| {
            log::warn!("Session storage unreadable: {}", e);
            None
        });
        guard_request(credential.as_ref())
    }

    /// Inspects the status of a protected response. A 401 or 403 clears the
    /// session and yields `SessionExpired`, or `SessionNotCleared` when the
    /// stored credential could not be removed. Any other status passes through.
    pub fn check_response(&self, status: u16) -> Result<(), GateError> {
        if !is_auth_rejection(status) {
            return Ok(());
        }

        log::info!("Server rejected the session credential ({}); clearing session", status);
        self.invalidate().map_err(|e| {
            log::error!("Failed to clear session storage: {}", e);
            GateError::SessionNotCleared
        })?;
        Err(GateError::SessionExpired)
    }

    pub fn invalidate(&self) -> Result<(), StorageError> {
        self.session.invalidate()
    }
}
