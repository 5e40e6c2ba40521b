use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Marks that a user has taken part in a quiz. At most one per user and quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub created_at: DateTime<Utc>,
}

impl Participation {
    pub fn new(user_id: &str, quiz_id: &str) -> Self {
        Participation {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            created_at: Utc::now(),
        }
    }
}
