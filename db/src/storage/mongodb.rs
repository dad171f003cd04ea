use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Client, Collection, Database, IndexModel,
    bson::{Document, doc},
    error::{ErrorKind, WriteFailure},
    options::IndexOptions,
};
use tracing::{debug, instrument};

use crate::{
    models::{DbSignalReading, DbUser},
    storage::{
        SignalReadingFilter, SignalReadingStore, Storage, StoreError, UserFilter, UserStore,
    },
};

pub const MONGODB_DEFAULT_DATABASE: &str = "esp32DB";
pub const MONGODB_COLLECTION_USERS: &str = "users";
pub const MONGODB_COLLECTION_SIGNAL_READINGS: &str = "signal_readings";

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug)]
pub struct MongoDBStorage(Client);

impl MongoDBStorage {
    /// Connect to MongoDB and make sure the server answers and the indexes
    /// exist. The client is created lazily by the driver, so the ping is what
    /// actually surfaces an unreachable server.
    pub async fn new(uri: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let storage = Self(client);

        Storage::ping(&storage).await?;
        storage.ensure_indexes().await?;

        Ok(storage)
    }

    fn get_db(&self) -> Database {
        self.0
            .default_database()
            .unwrap_or_else(|| self.0.database(MONGODB_DEFAULT_DATABASE))
    }

    fn users(&self) -> Collection<DbUser> {
        self.get_db().collection(MONGODB_COLLECTION_USERS)
    }

    fn signal_readings(&self) -> Collection<DbSignalReading> {
        self.get_db().collection(MONGODB_COLLECTION_SIGNAL_READINGS)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "uniqueID": 1 })
                    .options(IndexOptions::builder().unique(true).build())
                    .build(),
            )
            .await?;

        self.users()
            .create_index(IndexModel::builder().keys(doc! { "apiKey": 1 }).build())
            .await?;

        self.signal_readings()
            .create_index(IndexModel::builder().keys(doc! { "userID": 1 }).build())
            .await?;

        debug!(database = %self.get_db().name(), "Indexes ensured");
        Ok(())
    }
}

fn map_write_error(err: mongodb::error::Error) -> StoreError {
    let duplicate = matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    );

    if duplicate {
        StoreError::Conflict
    } else {
        StoreError::MongoDB(err)
    }
}

fn user_filter_doc(filter: UserFilter) -> Document {
    let mut filter_doc = doc! {};
    if let Some(unique_id) = filter.unique_id {
        filter_doc.insert("uniqueID", unique_id);
    }
    if let Some(api_key) = filter.api_key {
        filter_doc.insert("apiKey", api_key);
    }
    filter_doc
}

fn signal_reading_filter_doc(filter: SignalReadingFilter) -> Document {
    let mut filter_doc = doc! {};
    if let Some(user_id) = filter.user_id {
        filter_doc.insert("userID", user_id);
    }
    filter_doc
}

#[async_trait]
impl Storage for MongoDBStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.get_db().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

#[async_trait]
impl UserStore for MongoDBStorage {
    async fn get(&self, filter: UserFilter) -> Result<Option<DbUser>, StoreError> {
        self.users()
            .find_one(user_filter_doc(filter))
            .await
            .map_err(StoreError::MongoDB)
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        self.users()
            .find(user_filter_doc(filter))
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self, user), fields(unique_id = %user.unique_id))]
    async fn create(&self, user: DbUser) -> Result<DbUser, StoreError> {
        let result = self
            .users()
            .insert_one(&user)
            .await
            .map_err(map_write_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Internal("inserted user has no ObjectId".into()))?;

        Ok(DbUser {
            id: Some(id),
            ..user
        })
    }
}

#[async_trait]
impl SignalReadingStore for MongoDBStorage {
    #[instrument(skip(self, reading), fields(user_id = %reading.user_id))]
    async fn create(&self, reading: DbSignalReading) -> Result<DbSignalReading, StoreError> {
        let result = self
            .signal_readings()
            .insert_one(&reading)
            .await
            .map_err(map_write_error)?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::Internal("inserted reading has no ObjectId".into()))?;

        Ok(DbSignalReading {
            id: Some(id),
            ..reading
        })
    }

    async fn list(&self, filter: SignalReadingFilter) -> Result<Vec<DbSignalReading>, StoreError> {
        self.signal_readings()
            .find(signal_reading_filter_doc(filter))
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }
}
