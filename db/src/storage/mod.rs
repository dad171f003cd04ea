use async_trait::async_trait;
use bson::oid::ObjectId;
use thiserror::Error;

use crate::models::{DbSignalReading, DbUser};

#[cfg(feature = "test-utils")]
pub mod memory;
pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query Error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),

    /// A unique index rejected the write.
    #[error("Conflicting record already exists")]
    Conflict,

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

#[async_trait]
pub trait Storage: UserStore + SignalReadingStore + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    pub unique_id: Option<String>,
    pub api_key: Option<String>,
}

impl UserFilter {
    pub fn by_unique_id(unique_id: impl Into<String>) -> Self {
        Self {
            unique_id: Some(unique_id.into()),
            ..Default::default()
        }
    }

    pub fn by_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }

    pub fn matches(&self, user: &DbUser) -> bool {
        self.unique_id.as_ref().is_none_or(|u| *u == user.unique_id)
            && self.api_key.as_ref().is_none_or(|k| *k == user.api_key)
    }
}

#[async_trait]
pub trait UserStore {
    async fn get(&self, filter: UserFilter) -> Result<Option<DbUser>, StoreError>;

    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError>;

    /// Insert a new user, returning it with its assigned ID.
    ///
    /// Fails with [`StoreError::Conflict`] if a user with the same unique ID
    /// already exists.
    async fn create(&self, user: DbUser) -> Result<DbUser, StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct SignalReadingFilter {
    pub user_id: Option<ObjectId>,
}

impl SignalReadingFilter {
    pub fn matches(&self, reading: &DbSignalReading) -> bool {
        self.user_id.is_none_or(|id| id == reading.user_id)
    }
}

#[async_trait]
pub trait SignalReadingStore {
    async fn create(&self, reading: DbSignalReading) -> Result<DbSignalReading, StoreError>;

    async fn list(&self, filter: SignalReadingFilter) -> Result<Vec<DbSignalReading>, StoreError>;
}
