use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::DocumentStore;
use crate::todo::domain::Document;

/// In-memory document store, handy for tests and ephemeral runs.
/// `load` hands out a copy, so callers still go through load/mutate/save.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Document>,
}

impl MemoryStore {
    pub fn new(doc: Document) -> Self {
        Self { inner: RwLock::new(doc) }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn load(&self) -> Result<Document, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, doc: &Document) -> Result<(), ServiceError> {
        *self.inner.write().await = doc.clone();
        Ok(())
    }
}
