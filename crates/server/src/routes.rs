use axum::{
    response::Html,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::types::Health;

use crate::startup::AppState;

pub mod todos;

/// GET endpoints advertised by the sitemap.
const SITEMAP_LINKS: &[&str] = &["/health", "/todos/user"];

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Root page listing the browsable endpoints
pub async fn sitemap() -> Html<String> {
    let links: String = SITEMAP_LINKS
        .iter()
        .map(|path| format!("<li><a href=\"{path}\">{path}</a></li>"))
        .collect();
    Html(format!(
        "<div style=\"text-align: center;\"><h1>Todo API</h1>\
         <p>Endpoints:</p><ul style=\"text-align: left;\">{links}</ul></div>"
    ))
}

/// Build the full application router
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(sitemap))
        .route("/health", get(health));

    let todo_routes = Router::new()
        .route("/todos/user", get(todos::list_users))
        .route(
            "/todos/user/:username",
            get(todos::get_tasks)
                .post(todos::create_user)
                .put(todos::replace_tasks)
                .delete(todos::delete_user),
        );

    public
        .merge(todo_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path, at INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use service::{storage::MemoryStore, todo::TodoStore};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let state = AppState { todos: TodoStore::new(Arc::new(MemoryStore::default())) };
        build_router(state, CorsLayer::very_permissive())
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<&str>) -> anyhow::Result<(StatusCode, Value)> {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(b) => {
                req = req.header("content-type", "application/json");
                Body::from(b.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body)?).await?;
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
        Ok((status, value))
    }

    #[tokio::test]
    async fn create_get_replace_delete_flow() -> anyhow::Result<()> {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/todos/user/ana", Some("[]")).await?;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!([]));

        let (status, body) = call(&app, Method::GET, "/todos/user", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["ana"]));

        let (status, body) = call(&app, Method::GET, "/todos/user/ana", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([[{"label": "sample task", "done": false}]]));

        let (status, body) = call(
            &app,
            Method::PUT,
            "/todos/user/ana",
            Some(r#"[{"label":"a","done":true},{"label":"b","done":false}]"#),
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "2 todos have been updated successfully"}));

        let (_, body) = call(&app, Method::GET, "/todos/user/ana", None).await?;
        assert_eq!(body, json!([[{"label": "a", "done": true}, {"label": "b", "done": false}]]));

        let (status, body) = call(&app, Method::DELETE, "/todos/user/ana", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "The user ana has been deleted successfully"}));

        let (status, body) = call(&app, Method::GET, "/todos/user/ana", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "The user ana doesn't exist"}));
        Ok(())
    }

    #[tokio::test]
    async fn create_errors_keep_their_status_codes() -> anyhow::Result<()> {
        let app = app();

        let (status, body) = call(&app, Method::POST, "/todos/user/ana", Some(r#"[{"x":1}]"#)).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "You must add an empty array in the body of the request"}));

        let (status, _) = call(&app, Method::POST, "/todos/user/ana", None).await?;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        call(&app, Method::POST, "/todos/user/ana", Some("[]")).await?;
        let (status, body) = call(&app, Method::POST, "/todos/user/ana", Some("[]")).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"msg": "The user ana already exists"}));
        Ok(())
    }

    #[tokio::test]
    async fn replace_rejects_bad_bodies() -> anyhow::Result<()> {
        let app = app();
        call(&app, Method::POST, "/todos/user/ana", Some("[]")).await?;

        let (status, body) = call(&app, Method::PUT, "/todos/user/ana", Some(r#"{"label":"a","done":true}"#)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"msg": "You must send a valid JSON array of tasks"}));

        let (status, body) = call(&app, Method::PUT, "/todos/user/ana", Some(r#"[{"label":"a"}]"#)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"msg": "Each task must have 'label' (string) and 'done' (boolean) properties"}));

        let (status, _) = call(&app, Method::PUT, "/todos/user/nobody", Some("[]")).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = call(&app, Method::PUT, "/todos/user/ana", Some("[]")).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"msg": "0 todos have been updated successfully"}));
        let (_, body) = call(&app, Method::GET, "/todos/user/ana", None).await?;
        assert_eq!(body, json!([[]]));
        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_user_is_not_found() -> anyhow::Result<()> {
        let (status, body) = call(&app(), Method::DELETE, "/todos/user/ghost", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"msg": "The user ghost doesn't exist"}));
        Ok(())
    }

    #[tokio::test]
    async fn health_and_sitemap() -> anyhow::Result<()> {
        let app = app();
        let (status, body) = call(&app, Method::GET, "/health", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));

        let res = app
            .oneshot(Request::builder().uri("/").body(Body::empty())?)
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        let html = String::from_utf8(to_bytes(res.into_body(), usize::MAX).await?.to_vec())?;
        assert!(html.contains("/todos/user"));
        Ok(())
    }
}
