use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client, Collection,
};
use std::time::Duration;

use crate::{config::Config, errors::AppResult};

pub const USERS_COLLECTION: &str = "users";
pub const QUIZZES_COLLECTION: &str = "quizzes";
pub const SCORES_COLLECTION: &str = "scores";
pub const PARTICIPATION_COLLECTION: &str = "participation";
pub const USER_ANSWERS_COLLECTION: &str = "user_answers";

/// Every collection the app owns, in the order indexes are created.
pub const COLLECTIONS: [&str; 5] = [
    USERS_COLLECTION,
    QUIZZES_COLLECTION,
    SCORES_COLLECTION,
    PARTICIPATION_COLLECTION,
    USER_ANSWERS_COLLECTION,
];

const MAX_POOL_SIZE: u32 = 10;
const MIN_POOL_SIZE: u32 = 2;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Handle to the quiz database. Cheap to clone; clones share one pool.
#[derive(Clone)]
pub struct Database {
    client: Client,
    db_name: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let mut client_options = ClientOptions::parse(&config.mongo_conn_string).await?;

        client_options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        client_options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        client_options.max_pool_size = Some(MAX_POOL_SIZE);
        client_options.min_pool_size = Some(MIN_POOL_SIZE);
        client_options.connect_timeout = Some(CONNECT_TIMEOUT);
        client_options.server_selection_timeout = Some(CONNECT_TIMEOUT);

        let db = Self {
            client: Client::with_options(client_options)?,
            db_name: config.mongo_db_name.clone(),
        };
        db.health_check().await?;

        log::info!(
            "Connected to MongoDB database '{}' ({} collections)",
            db.db_name,
            COLLECTIONS.len()
        );
        Ok(db)
    }

    pub fn get_collection<T>(&self, collection_name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.client
            .database(&self.db_name)
            .collection(collection_name)
    }

    /// Round-trips a ping to the server; used at startup and by `/health/ready`.
    pub async fn health_check(&self) -> AppResult<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}
