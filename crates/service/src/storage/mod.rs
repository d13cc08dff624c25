//! Storage abstractions for service layer
//!
//! The todo store never touches files directly; it loads and saves the whole
//! document through [`DocumentStore`].

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::todo::domain::Document;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Persistence port for the todos document.
/// Implementations can be file-backed, in-memory, or remote KV.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self) -> Result<Document, ServiceError>;
    async fn save(&self, doc: &Document) -> Result<(), ServiceError>;
}
