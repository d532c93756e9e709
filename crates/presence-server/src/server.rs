//! HTTP listener and top-level server wiring.
//!
//! This module:
//! - Listens on the configured address/port.
//! - Upgrades `GET /ws` requests to WebSocket connections.
//! - Assigns each connection a `ConnectionId`.
//! - Spawns:
//!   - a per-connection task to handle I/O,
//!   - a single central hub task that owns `PresenceHub`.
//!
//! The actual per-connection logic and hub loop live in `client`
//! and `hub_task` modules respectively.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{ConnectInfo, State, WebSocketUpgrade};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use presence_core::{ConnectionId, PresenceHub};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::client;
use crate::config::{Config, CorsOrigin};
use crate::hub_task;
use crate::types::{ConnectionSettings, HubRx, HubTx};

/// State shared by the HTTP handlers.
#[derive(Clone)]
struct AppState {
    hub_tx: HubTx,
    live: Arc<AtomicUsize>,
    max_clients: usize,
    settings: ConnectionSettings,
}

/// A reserved connection slot, given back on drop.
struct ConnectionSlot(Arc<AtomicUsize>);

impl ConnectionSlot {
    fn try_acquire(live: &Arc<AtomicUsize>, max: usize) -> Option<Self> {
        live.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            (n < max).then_some(n + 1)
        })
        .ok()
        .map(|_| ConnectionSlot(live.clone()))
    }
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Run the server with the given configuration until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.socket_addr_string();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Listening on ws://{}/ws", listener.local_addr()?);

    serve(listener, config, PresenceHub::default(), shutdown_signal()).await
}

/// Serve presence connections on an already-bound listener.
pub async fn serve<F>(
    listener: TcpListener,
    config: Config,
    hub: PresenceHub,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    // Channel from connections → hub task.
    let (hub_tx, hub_rx): (HubTx, HubRx) = mpsc::unbounded_channel();

    // Spawn the central hub task.
    tokio::spawn(hub_task::run_hub_loop(hub_rx, hub));

    let state = AppState {
        hub_tx,
        live: Arc::new(AtomicUsize::new(0)),
        max_clients: config.max_clients,
        settings: ConnectionSettings::from(&config),
    };

    let app = router(state, &config);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await
    .context("server error")?;

    Ok(())
}

fn router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origin))
        .with_state(state)
}

fn cors_layer(origin: &CorsOrigin) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
    match origin {
        CorsOrigin::Any => layer.allow_origin(Any),
        CorsOrigin::Exact(value) => layer.allow_origin(value.clone()),
    }
}

async fn ws_handler(
    State(state): State<AppState>,
    ConnectInfo(peer_addr): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> Response {
    let Some(slot) = ConnectionSlot::try_acquire(&state.live, state.max_clients) else {
        warn!(
            "Rejecting connection from {}: max_clients ({}) reached",
            peer_addr, state.max_clients
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "too many connections").into_response();
    };

    let conn_id = ConnectionId::new(Uuid::new_v4().to_string());
    let hub_tx = state.hub_tx.clone();
    let settings = state.settings;

    ws.on_upgrade(move |socket| async move {
        let _slot = slot;
        info!(conn_id = %conn_id, "Connection opened from {}", peer_addr);
        client::run_client(conn_id.clone(), socket, hub_tx, settings).await;
        info!(conn_id = %conn_id, "Connection closed");
    })
}

async fn health() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}
