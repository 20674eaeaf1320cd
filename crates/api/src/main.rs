use std::net::SocketAddr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seatfinder_api::config::ServerConfig;
use seatfinder_api::router::build_app_router;
use seatfinder_api::state::AppState;
use seatfinder_db::DbPool;

const DEFAULT_LOG_FILTER: &str = "seatfinder_api=debug,seatfinder_db=info,tower_http=debug";

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify, and migrate. Any failure aborts startup.
async fn open_database() -> DbPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = seatfinder_db::create_pool(&url)
        .await
        .expect("Failed to connect to database");
    seatfinder_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    seatfinder_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database ready (pool open, migrations applied)");
    pool
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = config.port,
        sql_gate_mode = ?config.sql_gate_mode,
        site_url = %config.site_url,
        "SeatFinder API starting",
    );

    let state = AppState::new(open_database().await, config.clone());
    let app = build_app_router(state.clone(), &config);

    let ip = config.host.parse().expect("HOST must be an IP address");
    let addr = SocketAddr::new(ip, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!(%addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!(
        dropped_activity_writes = state.activity.dropped_writes(),
        "Server stopped"
    );
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut terminate =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                .expect("Failed to install SIGTERM handler");
        tokio::select! {
            result = tokio::signal::ctrl_c() => {
                result.expect("Failed to install Ctrl-C handler");
                tracing::info!("SIGINT received, shutting down");
            }
            _ = terminate.recv() => tracing::info!("SIGTERM received, shutting down"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
        tracing::info!("Ctrl-C received, shutting down");
    }
}
