mod element;

use crate::element::{LoggingControl, LoggingElement};
use jukesync_client::{ServerClient, StatePoller};
use jukesync_core::{CoreError, JukesyncConfig, StateHub, StateSource, StreamSync};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    // Load config or create template on first run
    let config = match JukesyncConfig::load_or_create() {
        Ok(config) => config,
        Err(CoreError::ConfigNotFound { path }) => {
            info!(
                "Created a config template at {}. Fill in your server URL and restart.",
                path.display()
            );
            std::process::exit(0);
        }
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    let client = match ServerClient::new(&config.server.url, &config.server.state_path) {
        Ok(client) => client,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };
    info!("Watching {}", client.state_url());

    let hub = StateHub::new();

    // Shared cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();
    let ctrlc_token = cancel_token.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received Ctrl+C, shutting down gracefully...");
        ctrlc_token.cancel();
    }) {
        error!("Failed to set Ctrl+C handler: {}", e);
    }

    let poller = Arc::new(StatePoller::new(
        client,
        hub.clone(),
        config.server.poll_interval_ms,
        Some(cancel_token.clone()),
    ));
    let poller_handle = Arc::clone(&poller).start();

    // The monitor drives a logging element instead of a real output
    let mut sync = StreamSync::new(
        Some(LoggingElement::default()),
        LoggingControl::default(),
        hub.clone(),
    );

    if config.stream.active_on_start {
        let snapshot = hub.snapshot().await;
        sync.toggle_stream(&snapshot);
    }

    // Apply every published state change to the element
    let mut rx = hub.subscribe();
    loop {
        tokio::select! {
            () = cancel_token.cancelled() => break,
            event = rx.recv() => match event {
                Ok(event) => {
                    debug!("State event: {event:?}");
                    let snapshot = hub.snapshot().await;
                    sync.sync(&snapshot);
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                    info!("State event channel closed");
                    break;
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    info!("Missed {n} state events");
                }
            }
        }
    }

    poller.stop();
    if let Err(e) = poller_handle.await {
        error!("Poller task failed: {e}");
    }
}
