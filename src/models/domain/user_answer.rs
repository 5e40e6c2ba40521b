use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub question: String,
    pub answer: String,
    pub is_correct: bool,
    pub created_at: DateTime<Utc>,
}

impl UserAnswer {
    pub fn new(user_id: &str, quiz_id: &str, question: &str, answer: &str, is_correct: bool) -> Self {
        UserAnswer {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            is_correct,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_answer_wire_format() {
        let answer = UserAnswer::new("user-1", "quiz-1", "What is 2 + 2?", "4", true);
        let json = serde_json::to_value(&answer).unwrap();

        assert_eq!(json["userId"], "user-1");
        assert_eq!(json["isCorrect"], true);
    }
}
