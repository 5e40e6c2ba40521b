pub mod participation;
pub mod quiz;
pub mod score;
pub mod user;
pub mod user_answer;

pub use participation::Participation;
pub use quiz::{Difficulty, Quiz, QuizQuestion, QuizTiming, QuizType};
pub use score::Score;
pub use user::{User, UserRole};
pub use user_answer::UserAnswer;
