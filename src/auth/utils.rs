use crate::{
    errors::{AppError, AppResult},
    models::domain::{User, UserRole},
};

// These take the stored user, not the token claims: the role is always
// re-read from the store before a protected action.

pub fn require_admin(actor: &User) -> AppResult<()> {
    match actor.role {
        UserRole::Admin => Ok(()),
        UserRole::Standard => Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        )),
    }
}

pub fn require_owner_or_admin(actor: &User, resource_owner_id: &str) -> AppResult<()> {
    if actor.role != UserRole::Admin && actor.id != resource_owner_id {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin_success() {
        let admin = User::test_user("admin", UserRole::Admin);
        assert!(require_admin(&admin).is_ok());
    }

    #[test]
    fn test_require_admin_failure() {
        let user = User::test_user("user", UserRole::Standard);
        assert!(matches!(require_admin(&user), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_require_owner_or_admin_as_owner() {
        let user = User::test_user("john", UserRole::Standard);
        assert!(require_owner_or_admin(&user, &user.id).is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_as_admin() {
        let admin = User::test_user("admin", UserRole::Admin);
        assert!(require_owner_or_admin(&admin, "other-user-id").is_ok());
    }

    #[test]
    fn test_require_owner_or_admin_failure() {
        let user = User::test_user("john", UserRole::Standard);
        assert!(require_owner_or_admin(&user, "jane-id").is_err());
    }
}
