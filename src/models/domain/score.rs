use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub id: String,
    pub user_id: String,
    pub quiz_id: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

impl Score {
    pub fn new(user_id: &str, quiz_id: &str, score: u32) -> Self {
        Score {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            quiz_id: quiz_id.to_string(),
            score,
            created_at: Utc::now(),
        }
    }
}

/// Mean of the given scores rounded to two decimal places, or `None` when
/// nothing has been recorded yet.
pub fn average_score(scores: &[Score]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }

    let total: u64 = scores.iter().map(|s| u64::from(s.score)).sum();
    let mean = total as f64 / scores.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
