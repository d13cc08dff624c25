use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ServiceError;

pub const SAMPLE_TASK_LABEL: &str = "sample task";
pub const CREATE_BODY_MSG: &str = "You must add an empty array in the body of the request";
pub const TASK_LIST_MSG: &str = "You must send a valid JSON array of tasks";
pub const TASK_SHAPE_MSG: &str = "Each task must have 'label' (string) and 'done' (boolean) properties";

/// A labeled to-do item. It has no id; its identity is its position in the
/// owner's list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub label: String,
    pub done: bool,
}

impl Task {
    pub fn new(label: impl Into<String>, done: bool) -> Self {
        Self { label: label.into(), done }
    }

    /// The task every new user starts with.
    pub fn sample() -> Self {
        Self::new(SAMPLE_TASK_LABEL, false)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub todos: Vec<Task>,
}

impl User {
    pub fn with_sample_task(username: impl Into<String>) -> Self {
        Self { username: username.into(), todos: vec![Task::sample()] }
    }
}

/// The whole persisted state: users in storage order.
/// Serialized as a bare JSON array.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Document {
    pub users: Vec<User>,
}

impl From<Vec<User>> for Document {
    fn from(users: Vec<User>) -> Self {
        Self { users }
    }
}

impl Document {
    pub fn usernames(&self) -> Vec<String> {
        self.users.iter().map(|u| u.username.clone()).collect()
    }

    /// Index of the first user with this name.
    pub fn position(&self, username: &str) -> Option<usize> {
        self.users.iter().position(|u| u.username == username)
    }

    pub fn find(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn find_mut(&mut self, username: &str) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.username == username)
    }

    pub fn contains(&self, username: &str) -> bool {
        self.position(username).is_some()
    }
}

/// Check one element of a task list: `label` must be a string and `done` a
/// boolean. Unknown fields are accepted and dropped.
pub fn validate_task(value: &Value) -> Result<Task, ServiceError> {
    let invalid = || ServiceError::InvalidRequest(TASK_SHAPE_MSG.into());
    let obj = value.as_object().ok_or_else(invalid)?;
    let label = obj.get("label").and_then(Value::as_str).ok_or_else(invalid)?;
    let done = obj.get("done").and_then(Value::as_bool).ok_or_else(invalid)?;
    Ok(Task::new(label, done))
}

/// Body of a create-user request. The only accepted body is `[]`.
pub fn validate_create_body(body: &Value) -> Result<(), ServiceError> {
    match body.as_array() {
        Some(items) if items.is_empty() => Ok(()),
        _ => Err(ServiceError::InvalidRequest(CREATE_BODY_MSG.into())),
    }
}

/// Body of a replace-tasks request: an array whose every element passes
/// [`validate_task`].
pub fn parse_task_list(body: &Value) -> Result<Vec<Task>, ServiceError> {
    let items = body
        .as_array()
        .ok_or_else(|| ServiceError::InvalidRequest(TASK_LIST_MSG.into()))?;
    items.iter().map(validate_task).collect()
}
