//! Router assembly and the listening loop.

use crate::routes::{auth, children, chores, history};
use crate::state::AppState;
use axum::routing::{get, post, put};
use axum::Router;
use log::{error, info};
use std::io;
use std::path::{Path, PathBuf};
use tower_http::services::{ServeDir, ServeFile};

/// Listener address and static asset location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// JSON endpoints only, rooted at `/api`.
pub fn api_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/children", get(children::list).post(children::create))
        .route(
            "/children/:id",
            get(children::get)
                .put(children::update)
                .delete(children::delete),
        )
        .route(
            "/children/:id/chores",
            get(chores::list_for_child).post(chores::create),
        )
        .route("/chores/:id", put(chores::update).delete(chores::delete))
        .route(
            "/chores/:id/complete",
            post(chores::complete).delete(chores::uncomplete),
        )
        .route("/auth/pin-exists", get(auth::pin_exists))
        .route("/auth/verify-pin", post(auth::verify_pin))
        .route("/auth/set-pin", post(auth::set_pin))
        .route("/history", get(history::household))
        .route("/history/child/:id", get(history::child));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health))
        .with_state(state)
}

/// Full application: API plus the static client with `index.html` fallback.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let index = static_dir.join("index.html");
    let assets = ServeDir::new(static_dir).fallback(ServeFile::new(index));
    api_router(state).fallback_service(assets)
}

async fn health() -> &'static str {
    "ok"
}

/// Binds the listener and serves until Ctrl-C.
pub async fn serve(config: ServerConfig, state: AppState) -> io::Result<()> {
    let app = router(state, &config.static_dir);
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        error!("event=server_bind module=http status=error addr={addr} error={err}");
        err
    })?;

    info!(
        "event=server_start module=http status=ok addr={addr} static_dir={}",
        config.static_dir.display()
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("event=server_stop module=http status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("event=server_signal module=http status=error error={err}");
    }
}
