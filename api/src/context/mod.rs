use std::sync::Arc;

use pinlog_db::storage::Storage;

/// State shared by every handler. The store handle is created once at
/// startup and cloned (by reference count) into each request.
#[derive(Clone)]
pub struct ApiContext {
    pub db: Arc<dyn Storage>,
}

impl ApiContext {
    pub fn new(db: Arc<dyn Storage>) -> Self {
        Self { db }
    }
}
