//! Server playback state polling.

use crate::api::ServerClient;
use crate::error::Result as ClientResult;
use async_trait::async_trait;
use jukesync_core::{DurationExt, StateHub, StateSource};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Upper bound on the error backoff delay
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Polls the server's state endpoint and publishes every snapshot to the
/// [`StateHub`].
///
/// Besides the regular poll interval, the poller serves out-of-cycle
/// refresh requests from the hub, so UI interactions (enabling the local
/// stream) sync against fresh state immediately instead of waiting for the
/// next tick.
pub struct StatePoller {
    client: ServerClient,
    hub: Arc<StateHub>,
    poll_interval: Duration,
    cancel_token: CancellationToken,
}

impl StatePoller {
    /// Create a new state poller
    ///
    /// # Arguments
    /// * `client` - Client for the server's state endpoint
    /// * `hub` - State hub to publish snapshots to
    /// * `poll_interval_ms` - Polling interval in milliseconds
    /// * `cancel_token` - Optional external cancellation token for graceful shutdown
    pub fn new(
        client: ServerClient,
        hub: Arc<StateHub>,
        poll_interval_ms: u64,
        cancel_token: Option<CancellationToken>,
    ) -> Self {
        Self {
            client,
            hub,
            poll_interval: Duration::from_millis(poll_interval_ms),
            cancel_token: cancel_token.unwrap_or_default(),
        }
    }

    /// Start polling in a background task
    #[must_use]
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            if let Err(e) = self.run().await {
                error!("State poller stopped with error: {}", e);
            }
        })
    }

    /// Poll the server once and publish the snapshot
    async fn poll_once(&self) -> ClientResult<()> {
        let state = self.client.get_state().await?;

        debug!(
            "Polled server: paused={}, stream_url={:?}, progress={}",
            state.paused,
            state.stream_url(),
            state.progress
        );

        self.hub.publish(state).await;
        Ok(())
    }
}

/// Error-counter bookkeeping shared by interval and refresh polls.
///
/// Any successful poll resets the counter; any failed poll, no matter
/// which branch triggered it, increments it and yields the next delay.
#[derive(Debug, Default)]
struct PollBackoff {
    consecutive_errors: u32,
}

impl PollBackoff {
    fn record_success(&mut self) {
        self.consecutive_errors = 0;
    }

    fn record_failure(&mut self) -> Duration {
        self.consecutive_errors += 1;
        backoff_delay(self.consecutive_errors)
    }
}

/// Exponential backoff delay after `consecutive_errors` failed polls,
/// capped at [`MAX_BACKOFF`].
fn backoff_delay(consecutive_errors: u32) -> Duration {
    // 100ms * 2^errors; the exponent is capped so the shift cannot overflow
    let backoff_ms = 100_u64.saturating_mul(2_u64.saturating_pow(consecutive_errors.min(10)));
    Duration::from_millis(backoff_ms.min(MAX_BACKOFF.as_millis_u64()))
}

#[async_trait]
impl StateSource for StatePoller {
    fn name(&self) -> &'static str {
        "http-poller"
    }

    fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    async fn run(&self) -> jukesync_core::error::Result<()> {
        info!("Starting playback state poller");

        let mut backoff = PollBackoff::default();

        loop {
            let result = tokio::select! {
                () = self.cancel_token.cancelled() => {
                    info!("Poller shutting down gracefully");
                    break;
                }
                // serve getState-style refreshes immediately
                () = self.hub.refresh_requested() => self.poll_once().await,
                () = tokio::time::sleep(self.poll_interval) => self.poll_once().await,
            };

            // refresh and interval polls share the error bookkeeping, so a
            // hammered refresh button cannot bypass the backoff
            match result {
                Ok(()) => backoff.record_success(),
                Err(e) => {
                    let delay = backoff.record_failure();
                    warn!("Poll error (attempt {}): {}", backoff.consecutive_errors, e);
                    if backoff.consecutive_errors >= 5 {
                        error!(
                            "Too many consecutive errors, waiting {} seconds",
                            delay.as_secs()
                        );
                    }
                    tokio::time::sleep(delay).await;
                }
            }
        }

        Ok(())
    }
}
