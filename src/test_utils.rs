use chrono::{Duration, Utc};

use crate::models::domain::{Quiz, User, UserRole};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    pub fn standard_user() -> User {
        User::test_user("alice", UserRole::Standard)
    }

    pub fn admin_user() -> User {
        User::test_user("admin", UserRole::Admin)
    }

    /// A quiz that opened yesterday and closes tomorrow.
    pub fn active_quiz() -> Quiz {
        let today = Utc::now().date_naive();
        Quiz::test_quiz("Active", today - Duration::days(1), today + Duration::days(1))
    }

    pub fn past_quiz() -> Quiz {
        let today = Utc::now().date_naive();
        Quiz::test_quiz("Past", today - Duration::days(30), today - Duration::days(1))
    }

    pub fn upcoming_quiz() -> Quiz {
        let today = Utc::now().date_naive();
        Quiz::test_quiz("Upcoming", today + Duration::days(1), today + Duration::days(30))
    }
}

#[cfg(test)]
pub mod test_helpers {
    use crate::errors::AppError;

    pub fn assert_forbidden<T: std::fmt::Debug>(result: Result<T, AppError>) {
        assert!(
            matches!(result, Err(AppError::Forbidden(_))),
            "Expected Forbidden, got: {:?}",
            result
        );
    }

    pub fn assert_validation_error<T: std::fmt::Debug>(result: Result<T, AppError>) {
        assert!(
            matches!(result, Err(AppError::ValidationError(_))),
            "Expected ValidationError, got: {:?}",
            result
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::QuizTiming;

    #[test]
    fn test_fixture_roles() {
        assert!(!standard_user().is_admin());
        assert!(admin_user().is_admin());
    }

    #[test]
    fn test_fixture_quiz_timing() {
        assert_eq!(active_quiz().timing(), QuizTiming::Active);
        assert_eq!(past_quiz().timing(), QuizTiming::Past);
        assert_eq!(upcoming_quiz().timing(), QuizTiming::Upcoming);
    }
}
