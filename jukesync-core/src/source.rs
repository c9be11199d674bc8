//! State source trait.

use crate::error::Result;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Trait for sources that feed server playback state into the
/// [`StateHub`](crate::StateHub).
///
/// The shipped implementation polls the server's HTTP state endpoint; the
/// upstream server can also push state over a websocket, which would slot
/// in behind the same trait. Implementations should:
///
/// - Publish every observed [`PlaybackState`](crate::PlaybackState) snapshot
///   to the hub
/// - Serve out-of-cycle refresh requests between regular updates
/// - Handle transient errors with retries/backoff
/// - Support graceful shutdown via cancellation token
#[async_trait]
pub trait StateSource: Send + Sync {
    /// Returns a human-readable name for this source.
    fn name(&self) -> &'static str;

    /// Run the source until cancelled or an unrecoverable error occurs.
    ///
    /// # Errors
    ///
    /// Returns an error if the source fails to start or encounters an
    /// unrecoverable error during operation.
    async fn run(&self) -> Result<()>;

    /// Get the cancellation token for this source.
    ///
    /// Used to signal graceful shutdown.
    fn cancel_token(&self) -> CancellationToken;

    /// Signal the source to stop.
    fn stop(&self) {
        self.cancel_token().cancel();
    }
}
