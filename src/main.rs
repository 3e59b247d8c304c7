//! Interval Timer - a local server that runs timed interval sequences
//!
//! This is the main entry point for the interval-timer application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use interval_timer::{
    api::create_router,
    config::Config,
    services::{CueNotifier, SilentNotifier, TimerStore, ToneNotifier},
    state::AppState,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting interval-timer v{}", env!("CARGO_PKG_VERSION"));

    let store = TimerStore::with_path(config.data_file());
    info!("Timer store: {}", store.path().display());

    let notifier: Arc<dyn CueNotifier> = if config.mute {
        info!("Cue tones muted");
        Arc::new(SilentNotifier)
    } else {
        Arc::new(ToneNotifier::new())
    };

    let state = Arc::new(AppState::new(store, notifier, config.port, config.host.clone()));
    let app = create_router(Arc::clone(&state));

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET/POST        /timers");
    info!("  GET/PUT/DELETE  /timers/:id");
    info!("  GET/POST/DELETE /timers/:id/run");
    info!("  POST            /timers/:id/run/{{toggle,restart,skip-forward,skip-back}}");
    info!("  GET             /palette, /status, /health");

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

    if let Err(e) = state.close_all_runs() {
        tracing::warn!("{}", e);
    }
    info!("Server shutdown complete");
    Ok(())
}
