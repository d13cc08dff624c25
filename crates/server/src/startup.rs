use std::{net::SocketAddr, path::Path, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging;
use configs::AppConfig;
use dotenvy::dotenv;
use service::{storage::JsonFileStore, todo::TodoStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub todos: TodoStore,
}

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// Build the router over a todos file, seeding it with `[]` if it is missing.
pub async fn build_app(todos_file: &Path) -> anyhow::Result<Router> {
    common::env::ensure_data_file(todos_file)
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;
    let storage = Arc::new(JsonFileStore::new(todos_file));
    let state = AppState { todos: TodoStore::new(storage) };
    Ok(routes::build_router(state, build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    init_logging(&cfg.logging.format);

    let todos_file = Path::new(&cfg.storage.todos_file);
    let app = build_app(todos_file).await?;

    let addr = bind_addr(&cfg)?;
    info!(%addr, todos_file = %todos_file.display(), "starting todo server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
