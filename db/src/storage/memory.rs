//! In-memory storage backend.
//!
//! Keeps users and readings in process memory with the same uniqueness rule
//! the MongoDB backend gets from its `uniqueID` index. Nothing survives a
//! restart, so this is only meant for tests.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bson::oid::ObjectId;

use crate::{
    models::{DbSignalReading, DbUser},
    storage::{
        SignalReadingFilter, SignalReadingStore, Storage, StoreError, UserFilter, UserStore,
    },
};

#[derive(Debug, Default)]
pub struct MemoryStorage {
    users: RwLock<Vec<DbUser>>,
    signal_readings: RwLock<Vec<DbSignalReading>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read()
        .map_err(|_| StoreError::Internal("memory storage lock poisoned".into()))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write()
        .map_err(|_| StoreError::Internal("memory storage lock poisoned".into()))
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[async_trait]
impl UserStore for MemoryStorage {
    async fn get(&self, filter: UserFilter) -> Result<Option<DbUser>, StoreError> {
        Ok(read(&self.users)?
            .iter()
            .find(|u| filter.matches(u))
            .cloned())
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        Ok(read(&self.users)?
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect())
    }

    async fn create(&self, user: DbUser) -> Result<DbUser, StoreError> {
        let mut users = write(&self.users)?;
        if users.iter().any(|u| u.unique_id == user.unique_id) {
            return Err(StoreError::Conflict);
        }

        let created = DbUser {
            id: Some(ObjectId::new()),
            ..user
        };
        users.push(created.clone());
        Ok(created)
    }
}

#[async_trait]
impl SignalReadingStore for MemoryStorage {
    async fn create(&self, reading: DbSignalReading) -> Result<DbSignalReading, StoreError> {
        let created = DbSignalReading {
            id: Some(ObjectId::new()),
            ..reading
        };
        write(&self.signal_readings)?.push(created.clone());
        Ok(created)
    }

    async fn list(&self, filter: SignalReadingFilter) -> Result<Vec<DbSignalReading>, StoreError> {
        Ok(read(&self.signal_readings)?
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}
