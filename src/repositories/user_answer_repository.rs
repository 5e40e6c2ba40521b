use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, USER_ANSWERS_COLLECTION},
    errors::AppResult,
    models::domain::UserAnswer,
};

#[async_trait]
pub trait UserAnswerRepository: Send + Sync {
    async fn create_many(&self, answers: Vec<UserAnswer>) -> AppResult<Vec<UserAnswer>>;
    async fn find_by_user(&self, user_id: &str, quiz_id: Option<&str>)
        -> AppResult<Vec<UserAnswer>>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoUserAnswerRepository {
    collection: Collection<UserAnswer>,
}

impl MongoUserAnswerRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(USER_ANSWERS_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl UserAnswerRepository for MongoUserAnswerRepository {
    async fn create_many(&self, answers: Vec<UserAnswer>) -> AppResult<Vec<UserAnswer>> {
        if answers.is_empty() {
            return Ok(answers);
        }

        self.collection.insert_many(&answers).await?;
        Ok(answers)
    }

    async fn find_by_user(
        &self,
        user_id: &str,
        quiz_id: Option<&str>,
    ) -> AppResult<Vec<UserAnswer>> {
        let mut filter = doc! { "userId": user_id };

        if let Some(qid) = quiz_id {
            filter.insert("quizId", qid);
        }

        let answers = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(answers)
    }

    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64> {
        let result = self
            .collection
            .delete_many(doc! { "quizId": quiz_id })
            .await?;
        Ok(result.deleted_count)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        let user_quiz_index = IndexModel::builder()
            .keys(doc! { "userId": 1, "quizId": 1 })
            .options(IndexOptions::builder().name("user_quiz".to_string()).build())
            .build();

        self.collection.create_index(user_quiz_index).await?;
        Ok(())
    }
}
