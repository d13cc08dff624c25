use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use service::{errors::ServiceError, todo::Task};

use crate::errors::JsonApiError;
use crate::startup::AppState;

#[derive(Serialize, Debug)]
pub struct MsgResponse {
    pub msg: String,
}

/// Request bodies are parsed by hand so that a missing or non-JSON body is
/// reported with the endpoint's own message rather than an extractor rejection.
fn parse_body(body: &Bytes) -> Value {
    serde_json::from_slice(body).unwrap_or(Value::Null)
}

/// List every username
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<String>>, JsonApiError> {
    Ok(Json(state.todos.list_usernames().await?))
}

/// Create a user; the body must be an empty JSON array.
/// A malformed body answers 500, not 400, for compatibility with existing clients.
pub async fn create_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Result<(StatusCode, Json<Vec<Value>>), JsonApiError> {
    state
        .todos
        .create_user(&username, &parse_body(&body))
        .await
        .map_err(|e| match e {
            ServiceError::InvalidRequest(msg) => JsonApiError::message(StatusCode::INTERNAL_SERVER_ERROR, msg),
            other => other.into(),
        })?;
    Ok((StatusCode::CREATED, Json(Vec::new())))
}

/// The user's task list, wrapped in a one-element array
pub async fn get_tasks(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Vec<Vec<Task>>>, JsonApiError> {
    let tasks = state.todos.get_tasks(&username).await?;
    Ok(Json(vec![tasks]))
}

/// Replace the user's task list
pub async fn replace_tasks(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Bytes,
) -> Result<Json<MsgResponse>, JsonApiError> {
    let count = state.todos.replace_tasks(&username, &parse_body(&body)).await?;
    Ok(Json(MsgResponse { msg: format!("{count} todos have been updated successfully") }))
}

/// Delete the user and all their tasks
pub async fn delete_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<MsgResponse>, JsonApiError> {
    state.todos.delete_user(&username).await?;
    Ok(Json(MsgResponse { msg: format!("The user {username} has been deleted successfully") }))
}
