use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoParticipationRepository, MongoQuizRepository, MongoScoreRepository,
        MongoUserAnswerRepository, MongoUserRepository, ParticipationRepository, QuizRepository,
        ScoreRepository, UserAnswerRepository, UserRepository,
    },
    services::{auth_service::AuthService, quiz_service::QuizService, user_service::UserService},
};

/// The storage seams the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub scores: Arc<dyn ScoreRepository>,
    pub participation: Arc<dyn ParticipationRepository>,
    pub answers: Arc<dyn UserAnswerRepository>,
}

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Option<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        let scores = Arc::new(MongoScoreRepository::new(&db));
        let participation = Arc::new(MongoParticipationRepository::new(&db));
        let answers = Arc::new(MongoUserAnswerRepository::new(&db));

        users.ensure_indexes().await?;
        quizzes.ensure_indexes().await?;
        scores.ensure_indexes().await?;
        participation.ensure_indexes().await?;
        answers.ensure_indexes().await?;

        let repositories = Repositories {
            users,
            quizzes,
            scores,
            participation,
            answers,
        };

        let mut state = Self::with_repositories(config, repositories);
        state.db = Some(db);
        Ok(state)
    }

    pub fn with_repositories(config: Config, repositories: Repositories) -> Self {
        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
        ));

        let auth_service = Arc::new(AuthService::new(
            repositories.users.clone(),
            jwt_service.clone(),
            config.password_cost,
        ));
        let user_service = Arc::new(UserService::new(
            repositories.users,
            config.seed_user_password.clone(),
            config.password_cost,
        ));
        let quiz_service = Arc::new(QuizService::new(
            repositories.quizzes,
            repositories.scores,
            repositories.participation,
            repositories.answers,
        ));

        Self {
            auth_service,
            user_service,
            quiz_service,
            jwt_service,
            db: None,
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }
}
