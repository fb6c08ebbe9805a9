//! Ready Room - hosts a room snapshot and the ready button bound to it
//!
//! This is the main entry point for the ready-room application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use ready_room::{
    api::create_router,
    button::Palette,
    config::Config,
    state::{AppState, RoomState},
    tasks::{button_view_logger_task, ReadyButton},
    utils::{shutdown_signal, until_shutdown},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("ready_room={},tower_http=info", config.log_level()))
        .init();

    info!("Starting ready-room server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, local_user={}",
          config.host, config.port, config.local_user);

    // Room cache and the ready button bound to it
    let room = Arc::new(RoomState::new(config.local_user));
    let button = ReadyButton::new(Arc::clone(&room), Palette::default()).activate();
    tokio::spawn(button_view_logger_task(button.subscribe()));

    let state = Arc::new(AppState::new(
        config.port,
        config.host.clone(),
        room,
        button.subscribe(),
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  PUT    /room   - Replace the room snapshot");
    info!("  DELETE /room   - Leave the room");
    info!("  GET    /room   - Current room snapshot");
    info!("  GET    /button - Ready button state");
    info!("  GET    /health - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = until_shutdown(shutdown_signal()) => {}
    }

    button.deactivate().await;
    info!("Server shutdown complete");
    Ok(())
}
