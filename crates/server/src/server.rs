use axum::{
    Router,
    routing::{get, post, put},
};

use std::sync::Arc;

use crate::{entries, users};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the application router around `engine`.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    Router::new()
        .route("/api/usuarios", post(users::user_new))
        .route("/api/usuarios/autenticar", post(users::authenticate))
        .route("/api/usuarios/{id}/saldo", get(users::balance))
        .route(
            "/api/lancamentos",
            post(entries::entry_new).get(entries::search),
        )
        .route(
            "/api/lancamentos/{id}",
            put(entries::update).delete(entries::delete),
        )
        .route(
            "/api/lancamentos/{id}/atualiza-status",
            put(entries::update_status),
        )
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
