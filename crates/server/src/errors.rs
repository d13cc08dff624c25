use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Error response with a status code and a ready-made JSON body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: Value,
}

impl JsonApiError {
    /// `{"msg": ...}`, the shape every todo endpoint uses for its own errors.
    pub fn msg(status: StatusCode, msg: impl Into<String>) -> Self {
        Self { status, body: json!({ "msg": msg.into() }) }
    }

    /// `{"message": ...}` without a status code field.
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, body: json!({ "message": message.into() }) }
    }

    /// Generic application error: `{"message": ..., "status_code": ...}`.
    pub fn application(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "message": message.into(), "status_code": status.as_u16() }),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::InvalidRequest(msg) => Self::msg(StatusCode::BAD_REQUEST, msg),
            ServiceError::Conflict(_) => Self::msg(StatusCode::BAD_REQUEST, e.to_string()),
            ServiceError::NotFound(_) => Self::msg(StatusCode::NOT_FOUND, e.to_string()),
            ServiceError::Storage(_) => {
                error!(error = %e, "todo storage failure");
                Self::application(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
