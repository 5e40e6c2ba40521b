use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, SCORES_COLLECTION},
    errors::AppResult,
    models::domain::Score,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    async fn create(&self, score: Score) -> AppResult<Score>;
    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Score>>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoScoreRepository {
    collection: Collection<Score>,
}

impl MongoScoreRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(SCORES_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl ScoreRepository for MongoScoreRepository {
    async fn create(&self, score: Score) -> AppResult<Score> {
        self.collection.insert_one(&score).await?;
        Ok(score)
    }

    async fn find_by_quiz(&self, quiz_id: &str) -> AppResult<Vec<Score>> {
        let scores = self
            .collection
            .find(doc! { "quizId": quiz_id })
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(scores)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quizId": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let quiz_index = IndexModel::builder()
            .keys(doc! { "quizId": 1 })
            .options(IndexOptions::builder().name("quiz_id".to_string()).build())
            .build();

        self.collection.create_index(quiz_index).await?;
        Ok(())
    }
}
