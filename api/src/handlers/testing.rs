//! Helpers for driving the router in handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use pinlog_db::{
    models::{DbSignalReading, DbUser},
    storage::{
        SignalReadingFilter, SignalReadingStore, Storage, StoreError, UserFilter, UserStore,
        memory::MemoryStorage,
    },
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{auth::API_KEY_HEADER, server};

pub(crate) fn router(db: Arc<dyn Storage>) -> Router {
    server::make(db).0
}

/// A router over a fresh in-memory store, plus the store itself for
/// inspecting what was persisted.
pub(crate) fn memory_router() -> (Router, Arc<MemoryStorage>) {
    let stg = Arc::new(MemoryStorage::new());
    (router(stg.clone()), stg)
}

pub(crate) fn post_json(uri: &str, body: Value, api_key: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(api_key) = api_key {
        builder = builder.header(API_KEY_HEADER, api_key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub(crate) async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Register `unique_id` through the API and return the issued key.
pub(crate) async fn register(router: &Router, unique_id: &str) -> String {
    let (status, body) = send(
        router,
        post_json("/auth", serde_json::json!({ "unique_id": unique_id }), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration failed: {body}");

    body["api_key"].as_str().unwrap().to_string()
}

/// A store whose every operation fails, for exercising the 500 paths.
#[derive(Debug, Default)]
pub(crate) struct FailingStorage;

fn unavailable() -> StoreError {
    StoreError::Internal("connection refused (10.0.0.5:27017)".into())
}

#[async_trait]
impl Storage for FailingStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

#[async_trait]
impl UserStore for FailingStorage {
    async fn get(&self, _filter: UserFilter) -> Result<Option<DbUser>, StoreError> {
        Err(unavailable())
    }

    async fn list(&self, _filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _user: DbUser) -> Result<DbUser, StoreError> {
        Err(unavailable())
    }
}

#[async_trait]
impl SignalReadingStore for FailingStorage {
    async fn create(&self, _reading: DbSignalReading) -> Result<DbSignalReading, StoreError> {
        Err(unavailable())
    }

    async fn list(&self, _filter: SignalReadingFilter) -> Result<Vec<DbSignalReading>, StoreError> {
        Err(unavailable())
    }
}

/// A store that loses the registration race: the first lookup finds nothing,
/// then the insert finds `winner` already written and fails with a conflict.
/// Without a winner the conflicting user never shows up at all.
#[derive(Debug)]
pub(crate) struct LostRaceStorage {
    pub(crate) inner: MemoryStorage,
    winner: Mutex<Option<DbUser>>,
}

impl LostRaceStorage {
    pub(crate) fn new(winner: Option<DbUser>) -> Self {
        Self {
            inner: MemoryStorage::new(),
            winner: Mutex::new(winner),
        }
    }
}

#[async_trait]
impl Storage for LostRaceStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        Storage::ping(&self.inner).await
    }
}

#[async_trait]
impl UserStore for LostRaceStorage {
    async fn get(&self, filter: UserFilter) -> Result<Option<DbUser>, StoreError> {
        if self.winner.lock().unwrap().is_some() {
            return Ok(None);
        }
        UserStore::get(&self.inner, filter).await
    }

    async fn list(&self, filter: UserFilter) -> Result<Vec<DbUser>, StoreError> {
        UserStore::list(&self.inner, filter).await
    }

    async fn create(&self, _user: DbUser) -> Result<DbUser, StoreError> {
        let winner = self.winner.lock().unwrap().take();
        if let Some(winner) = winner {
            UserStore::create(&self.inner, winner).await?;
        }
        Err(StoreError::Conflict)
    }
}

#[async_trait]
impl SignalReadingStore for LostRaceStorage {
    async fn create(&self, reading: DbSignalReading) -> Result<DbSignalReading, StoreError> {
        SignalReadingStore::create(&self.inner, reading).await
    }

    async fn list(&self, filter: SignalReadingFilter) -> Result<Vec<DbSignalReading>, StoreError> {
        SignalReadingStore::list(&self.inner, filter).await
    }
}
