use std::net::SocketAddr;
use std::sync::Arc;

use avatar_speech::api::SpeechApi;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use avatar_api::config::ServerConfig;
use avatar_api::router::build_app_router;
use avatar_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // LOG_FORMAT=json switches to structured JSON lines.
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "avatar_api=debug,avatar_speech=debug,tower_http=debug".into()
            }),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json_logs).then(tracing_subscriber::fmt::layer))
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    config.validate().expect("Invalid server configuration");
    tracing::info!(
        host = %config.host,
        port = config.port,
        endpoint = %config.speech.endpoint,
        api_version = %config.speech.api_version,
        poll_interval_secs = config.speech.poll_interval.as_secs(),
        "Loaded server configuration",
    );

    // --- Vendor client ---
    let speech_api =
        Arc::new(SpeechApi::new(config.speech.clone()).expect("Failed to build speech API client"));

    // --- App state ---
    let state = AppState::new(config.clone(), speech_api);
    let tracker = Arc::clone(&state.tracker);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    let active = tracker.active_monitor_count().await;
    tracing::info!(active, "Stopping job poll loops");
    tracker.shutdown();

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
