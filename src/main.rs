//! Tri Timer - A countdown timer service with three modes
//!
//! This is the main entry point for the tri-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use tri_timer::{
    config::Config,
    state::AppState,
    api::create_router,
    services::{check_player_available, CommandPlayer},
    tasks::tick_driver_task,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("tri_timer={},tower_http=info", config.log_level()))
        .init();

    let timer_config = config.timer_config();
    let player_program = config.player_program();

    info!("Starting tri-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, player={}, sounds={}",
          config.host, config.port, player_program, config.sounds_dir.display());

    // Audio is best-effort: a missing player only silences cues
    if let Err(e) = check_player_available(&player_program).await {
        warn!("{}", e);
    }

    let player = Arc::new(CommandPlayer::new(player_program, config.sounds_dir.clone()));
    let state = Arc::new(AppState::new(config.port, config.host.clone(), timer_config, player));
    info!("Timer: mode={}, duration={}s, warning={}s, interval={}s",
          timer_config.mode, timer_config.duration_secs,
          timer_config.warning_offset_secs, timer_config.beep_interval_secs);

    // Load sounds in the background; commands are accepted meanwhile
    let loader_state = Arc::clone(&state);
    tokio::spawn(async move {
        loader_state.load_cues().await;
    });

    // Start the tick driver background task
    let driver_state = Arc::clone(&state);
    tokio::spawn(async move {
        tick_driver_task(driver_state).await;
    });

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start                          - Start or resume the countdown");
    info!("  POST /pause                          - Pause the countdown");
    info!("  POST /stop                           - Stop and clear the countdown");
    info!("  POST /reset                          - Rewind to the full duration");
    info!("  PUT  /config                         - Update mode and durations");
    info!("  POST /config/:field/:unit/:direction - Step a picker column");
    info!("  GET  /status                         - Current timer snapshot");
    info!("  GET  /health                         - Health check");

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
