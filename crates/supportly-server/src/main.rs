mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tower_sessions::MemoryStore;
use tracing::{info, warn};

use supportly_api::render::HtmlRenderer;
use supportly_api::{AppState, AppStateInner, SessionSettings, session_layer};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "supportly=debug,supportly_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = Config::from_env()?;

    let sessions = session_layer(
        MemoryStore::default(),
        &SessionSettings {
            cookie_name: config.cookie_name.clone(),
            secure: config.secure_cookie,
            idle_timeout: config.session_ttl,
        },
    );

    let state: AppState = Arc::new(AppStateInner {
        renderer: Box::new(HtmlRenderer),
    });

    let app = supportly_api::router(state, sessions).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("Supportly listening on {}", addr);
    info!(
        "Idle sessions expire after {} minutes",
        config.session_ttl.whole_minutes()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("SIGTERM handler unavailable: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
