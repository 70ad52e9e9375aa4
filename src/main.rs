//! Focus Timer - a Focus/Break countdown controlled over HTTP
//!
//! This is the main entry point for the focus-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use focus_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::{phase_notifier_task, tick_source_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("focus_timer={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_configuration()?;

    info!("Starting focus-timer server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, focus={}min, break={}min",
          config.host, config.port, timer_config.focus_minutes(), timer_config.break_minutes());

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer_config));

    // Start the phase notifier before anything can tick
    let notifier_state = Arc::clone(&state);
    let command = config.on_phase_change.clone();
    tokio::spawn(async move {
        phase_notifier_task(notifier_state, command).await;
    });

    // Start the 1 Hz tick source
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_source_task(tick_state).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start           - Start or resume the countdown");
    info!("  POST /pause           - Pause the countdown");
    info!("  POST /toggle          - Toggle between running and paused");
    info!("  POST /reset           - Reset to a 25 minute focus phase");
    info!("  POST /focus/increase  - Add a minute to the focus duration");
    info!("  POST /focus/decrease  - Remove a minute from the focus duration");
    info!("  GET  /status          - Current phase and remaining time");
    info!("  GET  /health          - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
