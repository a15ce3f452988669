use anyhow::Context;
use std::net::SocketAddr;
use tripbook_api::{app, state::AppState};
use tripbook_store::{app_config::Config, sessions::start_session_sweeper, SessionRegistry};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tripbook_api=debug,tripbook_store=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting trip tracker on port {}", config.server.port);

    let sessions = SessionRegistry::new();
    tokio::spawn(start_session_sweeper(
        sessions.clone(),
        config.session.sweep_interval(),
        config.session.idle_timeout(),
    ));

    let app = app(AppState::new(sessions, config.session.cookie_name.clone()));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
