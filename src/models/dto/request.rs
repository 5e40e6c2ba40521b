use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{
    quiz::{Difficulty, QuizType},
    QuizQuestion, UserRole,
};

static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9_]+$").expect("USERNAME_REGEX is a valid regex pattern")
});

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(
        length(min = 3, max = 50),
        regex(
            path = *USERNAME_REGEX,
            message = "Username must be alphanumeric with underscores"
        )
    )]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(min = 8, max = 128, message = "Password must be 8 to 128 characters"))]
    pub password: Option<String>,

    /// Only honoured when the caller is an admin.
    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_quiz_window"))]
pub struct CreateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[serde(rename = "type")]
    pub quiz_type: QuizType,

    pub difficulty: Difficulty,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(min = 1, message = "A quiz needs at least one question"))]
    pub questions: Vec<QuizQuestion>,
}

fn validate_quiz_window(request: &CreateQuizRequest) -> Result<(), ValidationError> {
    if request.end_date < request.start_date {
        return Err(ValidationError::new("end_date_before_start_date"));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuizRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[serde(rename = "type")]
    pub quiz_type: Option<QuizType>,

    pub difficulty: Option<Difficulty>,

    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    #[validate(length(min = 1, message = "A quiz needs at least one question"))]
    pub questions: Option<Vec<QuizQuestion>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateScoreRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    pub score: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipationRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AnswerInput {
    #[validate(length(min = 1))]
    pub question: String,

    pub answer: String,

    pub is_correct: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnswersRequest {
    #[validate(length(min = 1))]
    pub quiz_id: String,

    #[validate(length(min = 1), nested)]
    pub answers: Vec<AnswerInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswersQuery {
    pub quiz_id: Option<String>,
}
