//! HTTP server for the playground page
//!
//! `POST /exec` runs allow-listed commands; every other GET is served from
//! the static root. `/exec` always answers 200 with an [`ExecResult`] body,
//! failures included.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    routing::{get_service, post, MethodRouter},
    Json, Router,
};
use tokio::signal;
use tower_http::{
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::guard::CommandGuard;
use crate::handlers;
use crate::params::ExecRequest;
use crate::types::{Config, ExecError, ExecResult};

/// Startup configuration, built once from the CLI
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Document root for static files
    pub static_root: PathBuf,
    pub exec: Config,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            static_root: default_static_root(),
            exec: Config::default(),
        }
    }
}

/// The `static/` directory shipped next to this crate's sources
pub fn default_static_root() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static"))
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<CommandGuard>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let guard = CommandGuard::new(&config);
        Self {
            guard: Arc::new(guard),
            config: Arc::new(config),
        }
    }
}

/// Load exec configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config, ExecError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ExecError::Config(format!("Failed to read {}: {}", path.display(), e)))?;

    let config = toml::from_str::<Config>(&content)
        .map_err(|e| ExecError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;

    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Start the server and run until Ctrl+C or SIGTERM
pub async fn serve(config: ServerConfig) -> Result<()> {
    if !config.static_root.is_dir() {
        tracing::warn!(
            "Static root {} is not a directory; only /exec will be useful",
            config.static_root.display()
        );
    }

    let state = AppState::new(config.exec);
    tracing::debug!(
        prefixes = ?state.guard.allowed_prefixes(),
        shell = %state.config.commands.shell,
        "Exec gate ready"
    );

    let app = create_router(state, &config.static_root);

    let addr = SocketAddr::new(config.host, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!(
        "UV Playground server running at http://localhost:{}",
        config.port
    );
    tracing::info!("Serving {}", config.static_root.display());
    tracing::info!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState, static_root: &Path) -> Router {
    let static_files: MethodRouter = get_service(ServeDir::new(static_root)).fallback(not_found);

    Router::new()
        .route("/exec", post(exec).fallback(not_found))
        .fallback_service(static_files)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

/// `POST /exec`
///
/// Body problems never surface as HTTP errors: they decode to an empty
/// command, which the guard rejects.
///
/// The command runs on its own task, so a client hanging up does not cancel
/// it. Only the timeout kills the child.
async fn exec(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Json<ExecResult> {
    let request = match body {
        Ok(bytes) => ExecRequest::from_body(&bytes),
        Err(rejection) => {
            tracing::warn!("Unreadable exec body: {}", rejection);
            ExecRequest::default()
        }
    };

    let task = tokio::spawn(async move {
        handlers::execute(&state.guard, &state.config, &request.cmd).await
    });

    let result = match task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Exec task failed: {}", e);
            ExecResult::failure(e.to_string(), 1)
        }
    };

    Json(result)
}

async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            tracing::info!("Received terminate signal, shutting down...");
        },
    }
}
