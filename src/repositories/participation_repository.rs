use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{
    db::{Database, PARTICIPATION_COLLECTION},
    errors::{is_duplicate_key, AppError, AppResult},
    models::domain::Participation,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ParticipationRepository: Send + Sync {
    async fn create(&self, participation: Participation) -> AppResult<Participation>;
    async fn exists(&self, user_id: &str, quiz_id: &str) -> AppResult<bool>;
    async fn delete_by_quiz(&self, quiz_id: &str) -> AppResult<u64>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoParticipationRepository {
    collection: Collection<Participation>,
}

impl MongoParticipationRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(PARTICIPATION_COLLECTION);
        Self { collection }
    }
}

#[async_trait]
impl ParticipationRepository for MongoParticipationRepository {
    async fn create(&self, participation: Participation) -> AppResult<Participation> {
        if self
            .exists(&participation.user_id, &participation.quiz_id)
            .await?
        {
            return Err(AppError::AlreadyExists(format!(
                "Participation in quiz '{}' already recorded",
                participation.quiz_id
            )));
        }

        // A concurrent create can pass the lookup above; the unique index decides.
        self.collection
            .insert_one(&participation)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::AlreadyExists(format!(
                    "Participation in quiz '{}' already recorded",
                    participation.quiz_id
                ))
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(participation)
    }

    async fn exists(&self, user_id: &str, quiz_id: &str) -> AppResult<bool> {
        let found = self
            .collection
            .find_one(doc! { "userId": user_id, "quizId": quiz_id })
            .await?;
        Ok(found.is_some())
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
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("user_quiz_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_quiz_index).await?;
        Ok(())
    }
}
