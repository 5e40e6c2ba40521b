//! Render decisions for the role-dependent parts of the quiz views.
//!
//! These decide what to offer, not what is allowed; every action they
//! enable still goes through a server-checked request.

use crate::{
    client::{
        gate::{authorize, is_authenticated, GateError},
        session::SessionClaim,
    },
    models::domain::UserRole,
};

pub const LOGIN_REQUIRED_MESSAGE: &str = "Unauthorized. Please log in";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPageView {
    LoginRequired,
    /// The caller's own account table.
    Profile,
    /// The caller's own table plus the table of every account.
    ProfileAndAllUsers,
}

pub fn user_page(claim: Option<&SessionClaim>) -> UserPageView {
    match claim {
        Some(c) if is_authenticated(claim) => match c.role {
            UserRole::Admin => UserPageView::ProfileAndAllUsers,
            UserRole::Standard => UserPageView::Profile,
        },
        _ => UserPageView::LoginRequired,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizRowActions {
    LoginToPlay,
    Play,
    PlayAndDelete,
}

impl QuizRowActions {
    pub fn can_play(&self) -> bool {
        !matches!(self, QuizRowActions::LoginToPlay)
    }

    pub fn can_delete(&self) -> bool {
        matches!(self, QuizRowActions::PlayAndDelete)
    }
}

pub fn quiz_row_actions(claim: Option<&SessionClaim>) -> QuizRowActions {
    match claim {
        Some(c) if is_authenticated(claim) => match c.role {
            UserRole::Admin => QuizRowActions::PlayAndDelete,
            UserRole::Standard => QuizRowActions::Play,
        },
        _ => QuizRowActions::LoginToPlay,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRowActions {
    None,
    EditAndDelete,
}

/// Actions offered on one row of the all-users table. Admin rows are locked.
pub fn user_row_actions(row_role: UserRole) -> UserRowActions {
    match row_role {
        UserRole::Admin => UserRowActions::None,
        UserRole::Standard => UserRowActions::EditAndDelete,
    }
}

/// Whether the all-users table may render at all.
pub fn users_table(claim: Option<&SessionClaim>) -> Result<(), GateError> {
    authorize(claim, UserRole::Admin)
}
