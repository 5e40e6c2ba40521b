pub mod participation_repository;
pub mod quiz_repository;
pub mod score_repository;
pub mod user_answer_repository;
pub mod user_repository;

pub use participation_repository::{MongoParticipationRepository, ParticipationRepository};
pub use quiz_repository::{MongoQuizRepository, QuizRepository};
pub use score_repository::{MongoScoreRepository, ScoreRepository};
pub use user_answer_repository::{MongoUserAnswerRepository, UserAnswerRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
