use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub quiz_type: QuizType,
    pub difficulty: Difficulty,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub questions: Vec<QuizQuestion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizType {
    Multiple,
    Boolean,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Where a quiz sits relative to its open window on a given day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QuizTiming {
    Past,
    Active,
    Upcoming,
}

impl Quiz {
    pub fn new(
        name: &str,
        quiz_type: QuizType,
        difficulty: Difficulty,
        category: Option<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        questions: Vec<QuizQuestion>,
    ) -> Self {
        Quiz {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quiz_type,
            difficulty,
            category,
            start_date,
            end_date,
            questions,
            created_at: Some(Utc::now()),
        }
    }

    pub fn timing_on(&self, today: NaiveDate) -> QuizTiming {
        if self.end_date < today {
            QuizTiming::Past
        } else if self.start_date > today {
            QuizTiming::Upcoming
        } else {
            QuizTiming::Active
        }
    }

    pub fn timing(&self) -> QuizTiming {
        self.timing_on(Utc::now().date_naive())
    }
}

#[cfg(test)]
impl Quiz {
    pub fn test_quiz(name: &str, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Quiz::new(
            name,
            QuizType::Multiple,
            Difficulty::Easy,
            None,
            start_date,
            end_date,
            vec![QuizQuestion {
                question: "What is 2 + 2?".to_string(),
                correct_answer: "4".to_string(),
                incorrect_answers: vec!["3".to_string(), "5".to_string(), "22".to_string()],
            }],
        )
    }
}
