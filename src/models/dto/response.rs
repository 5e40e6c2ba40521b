use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::{
    quiz::{Difficulty, QuizType},
    Quiz, QuizQuestion, QuizTiming, User, UserRole,
};

/// Body of every successful API response: `{ "data": ... }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            id: user.id,
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub data: UserDto,
    pub msg: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse<T> {
    pub data: T,
    pub msg: String,
}

/// A quiz as listed publicly: the stored quiz plus its recorded scores and
/// where it sits in its open window today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizDto {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timing: QuizTiming,
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub user_quiz_scores: Vec<u32>,
}

impl QuizDto {
    pub fn from_quiz(quiz: Quiz, timing: QuizTiming, user_quiz_scores: Vec<u32>) -> Self {
        QuizDto {
            id: quiz.id,
            name: quiz.name,
            quiz_type: quiz.quiz_type,
            difficulty: quiz.difficulty,
            category: quiz.category,
            start_date: quiz.start_date,
            end_date: quiz.end_date,
            timing,
            questions: quiz.questions,
            user_quiz_scores,
        }
    }
}
