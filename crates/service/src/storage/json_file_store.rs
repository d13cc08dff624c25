use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::fs;

use crate::errors::ServiceError;
use crate::storage::DocumentStore;
use crate::todo::domain::Document;

/// JSON file-backed document store.
///
/// Every `load` reads and parses the whole file and every `save` rewrites it
/// in full. Nothing is cached between calls, so a missing or malformed file
/// fails the operation that touches it.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

/// Four-space indented JSON, the layout the todos file has always used.
fn to_pretty_json(doc: &Document) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    doc.serialize(&mut ser).map_err(ServiceError::storage)?;
    Ok(buf)
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn load(&self) -> Result<Document, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::Storage(format!("read {}: {e}", self.file_path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Storage(format!("parse {}: {e}", self.file_path.display())))
    }

    async fn save(&self, doc: &Document) -> Result<(), ServiceError> {
        let data = to_pretty_json(doc)?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", self.file_path.display())))?;
        Ok(())
    }
}
