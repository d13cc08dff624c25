use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::errors::ServiceError;
use crate::storage::DocumentStore;
use crate::todo::domain::{parse_task_list, validate_create_body, Task, User};

/// Users and their task lists on top of a [`DocumentStore`].
///
/// Each call loads the whole document, works on it, and writes it back in
/// full if it changed anything. There is no lock across that cycle: two
/// concurrent writers race and the later save wins.
#[derive(Clone)]
pub struct TodoStore {
    storage: Arc<dyn DocumentStore>,
}

impl TodoStore {
    pub fn new(storage: Arc<dyn DocumentStore>) -> Self {
        Self { storage }
    }

    /// Every username in storage order.
    pub async fn list_usernames(&self) -> Result<Vec<String>, ServiceError> {
        let doc = self.storage.load().await?;
        Ok(doc.usernames())
    }

    /// Create `username` seeded with the sample task. `body` must be `[]`.
    pub async fn create_user(&self, username: &str, body: &Value) -> Result<(), ServiceError> {
        validate_create_body(body)?;
        let mut doc = self.storage.load().await?;
        if doc.contains(username) {
            return Err(ServiceError::Conflict(username.to_string()));
        }
        doc.users.push(User::with_sample_task(username));
        self.storage.save(&doc).await?;
        info!(%username, users = doc.users.len(), "user created");
        Ok(())
    }

    pub async fn get_tasks(&self, username: &str) -> Result<Vec<Task>, ServiceError> {
        let doc = self.storage.load().await?;
        doc.find(username)
            .map(|u| u.todos.clone())
            .ok_or_else(|| ServiceError::NotFound(username.to_string()))
    }

    /// Overwrite the user's whole task list; returns how many tasks were written.
    /// The body is validated before the document is read.
    pub async fn replace_tasks(&self, username: &str, body: &Value) -> Result<usize, ServiceError> {
        let tasks = parse_task_list(body)?;
        let mut doc = self.storage.load().await?;
        let user = doc
            .find_mut(username)
            .ok_or_else(|| ServiceError::NotFound(username.to_string()))?;
        let count = tasks.len();
        user.todos = tasks;
        self.storage.save(&doc).await?;
        debug!(%username, count, "tasks replaced");
        Ok(count)
    }

    /// Remove the first user record with this name.
    pub async fn delete_user(&self, username: &str) -> Result<(), ServiceError> {
        let mut doc = self.storage.load().await?;
        let idx = doc
            .position(username)
            .ok_or_else(|| ServiceError::NotFound(username.to_string()))?;
        doc.users.remove(idx);
        self.storage.save(&doc).await?;
        info!(%username, "user deleted");
        Ok(())
    }
}
