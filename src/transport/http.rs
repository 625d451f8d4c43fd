use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::status::StatusHub;
use crate::transport::message::{Overview, StatusResponse};
use crate::transport::websocket::ws_handler;
use crate::utils::error::{AppError, AppResult};

/// Shared state for the query handlers.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<StatusHub>,
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(hub: Arc<StatusHub>, shutdown: CancellationToken) -> Self {
        Self { hub, shutdown }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(overview))
        .route("/status/{target}", get(target_status))
        .route("/status/{target}/", get(target_status))
        .route("/overviewUpdates", get(ws_handler))
        .route("/overviewUpdates/", get(ws_handler))
        .with_state(state)
}

pub async fn bind(addr: &str) -> AppResult<TcpListener> {
    TcpListener::bind(addr).await.map_err(|source| AppError::Bind {
        addr: addr.to_string(),
        source,
    })
}

/// Serve the query interface until the shutdown token fires.
pub async fn serve(listener: TcpListener, state: AppState) {
    let shutdown = state.shutdown.clone();
    match listener.local_addr() {
        Ok(addr) => info!(%addr, "query interface listening"),
        Err(e) => debug!(error = %e, "query interface listening on unknown address"),
    }

    let result = axum::serve(listener, create_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await;

    match result {
        Ok(()) => info!("query interface stopped"),
        Err(e) => error!(error = %e, "query interface failed"),
    }
}

#[derive(Debug, Deserialize)]
struct StatusQuery {
    mode: Option<String>,
}

async fn target_status(
    State(state): State<AppState>,
    Path(target): Path<String>,
    Query(query): Query<StatusQuery>,
) -> Response {
    let Some(status) = state.hub.get_status(&target) else {
        debug!(target_name = %target, "status requested for unknown target");
        return (StatusCode::NOT_FOUND, format!("unknown target: {target}")).into_response();
    };

    if query.mode.as_deref() == Some("simple") {
        return status.as_str().into_response();
    }
    Json(StatusResponse {
        server: target,
        status,
    })
    .into_response()
}

async fn overview(State(state): State<AppState>) -> Json<Overview> {
    Json(Overview {
        servers: state.hub.snapshot(),
    })
}
