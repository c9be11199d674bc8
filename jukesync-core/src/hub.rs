use crate::playback::{PlaybackState, Song};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Notify, RwLock};

/// Position jump size in a published snapshot that counts as a server-side
/// seek rather than regular progress.
const SEEK_THRESHOLD: Duration = Duration::from_secs(2);

/// Events emitted by the state hub when a published snapshot differs from
/// the previous one
#[derive(Debug, Clone)]
pub enum StateEvent {
    /// A different song started playing
    SongChanged {
        song: Song,
        position: Duration,
    },
    /// The server paused playback
    Paused {
        position: Duration,
    },
    /// The server resumed playback
    Resumed {
        position: Duration,
    },
    /// Nothing is playing anymore
    Stopped,
    /// The position jumped within the current song
    SeekDetected {
        position: Duration,
    },
    /// Regular progress update
    ProgressSync {
        position: Duration,
    },
}

/// Shared holder of the latest server playback state.
///
/// Sources publish snapshots into the hub; consumers either subscribe to
/// diff-derived [`StateEvent`]s or read the latest snapshot directly. The
/// hub also carries the refresh channel that lets UI interactions request
/// an out-of-cycle poll.
pub struct StateHub {
    state: RwLock<PlaybackState>,
    event_tx: broadcast::Sender<StateEvent>,
    refresh: Notify,
}

impl StateHub {
    /// Create a new hub holding the default (idle) state
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Subscribe to state events
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    /// Publish a fresh snapshot and emit the event describing what changed.
    ///
    /// Exactly one event is emitted per published snapshot, chosen in
    /// priority order: song change, pause flip, seek, regular progress.
    pub async fn publish(&self, new_state: PlaybackState) {
        let mut state = self.state.write().await;
        let old_state = &*state;

        let song_changed = old_state.song_changed(&new_state);
        let pause_changed = old_state.pause_changed(&new_state);
        let seek_occurred = old_state.position_jumped(&new_state, SEEK_THRESHOLD);
        let position = new_state.target_position();

        if song_changed {
            if let Some(ref song) = new_state.current_song {
                let _ = self.event_tx.send(StateEvent::SongChanged {
                    song: song.clone(),
                    position,
                });
            } else {
                let _ = self.event_tx.send(StateEvent::Stopped);
            }
        } else if pause_changed {
            if new_state.paused {
                let _ = self.event_tx.send(StateEvent::Paused { position });
            } else {
                let _ = self.event_tx.send(StateEvent::Resumed { position });
            }
        } else if seek_occurred {
            let _ = self.event_tx.send(StateEvent::SeekDetected { position });
        } else {
            let _ = self.event_tx.send(StateEvent::ProgressSync { position });
        }

        *state = new_state;
    }

    /// Get the latest published snapshot
    pub async fn snapshot(&self) -> PlaybackState {
        self.state.read().await.clone()
    }

    /// Request an out-of-cycle refresh from whatever source feeds this hub
    pub fn request_refresh(&self) {
        self.refresh.notify_one();
    }

    /// Wait until someone requests a refresh.
    ///
    /// Used by polling sources to serve refresh requests between regular
    /// poll ticks. A request made while nobody is waiting is remembered
    /// and completes the next call immediately.
    pub async fn refresh_requested(&self) {
        self.refresh.notified().await;
    }
}

impl Default for StateHub {
    fn default() -> Self {
        let (event_tx, _) = broadcast::channel(64);
        Self {
            state: RwLock::new(PlaybackState::default()),
            event_tx,
            refresh: Notify::new(),
        }
    }
}

impl crate::element::StateRefresh for Arc<StateHub> {
    fn request_refresh(&self) {
        StateHub::request_refresh(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing(url: &str, progress: f64) -> PlaybackState {
        PlaybackState::new(
            Some(Song::streamable(url, Duration::from_secs(100))),
            false,
            progress,
        )
    }

    #[tokio::test]
    async fn test_song_change_event() {
        let hub = StateHub::new();
        let mut rx = hub.subscribe();

        hub.publish(playing("a.mp3", 0.0)).await;
        assert!(matches!(rx.try_recv(), Ok(StateEvent::SongChanged { .. })));
    }

    #[tokio::test]
    async fn test_stop_event() {
        let hub = StateHub::new();
        hub.publish(playing("a.mp3", 0.0)).await;

        let mut rx = hub.subscribe();
        hub.publish(PlaybackState::default()).await;
        assert!(matches!(rx.try_recv(), Ok(StateEvent::Stopped)));
    }

    #[tokio::test]
    async fn test_pause_and_resume_events() {
        let hub = StateHub::new();
        hub.publish(playing("a.mp3", 10.0)).await;

        let mut rx = hub.subscribe();
        let paused = PlaybackState::new(
            Some(Song::streamable("a.mp3", Duration::from_secs(100))),
            true,
            10.0,
        );
        hub.publish(paused).await;
        assert!(matches!(rx.try_recv(), Ok(StateEvent::Paused { .. })));

        hub.publish(playing("a.mp3", 10.0)).await;
        assert!(matches!(rx.try_recv(), Ok(StateEvent::Resumed { .. })));
    }

    #[tokio::test]
    async fn test_seek_event() {
        let hub = StateHub::new();
        hub.publish(playing("a.mp3", 10.0)).await;

        let mut rx = hub.subscribe();
        hub.publish(playing("a.mp3", 50.0)).await;
        match rx.try_recv() {
            Ok(StateEvent::SeekDetected { position }) => {
                assert_eq!(position, Duration::from_secs(50));
            }
            other => unreachable!("expected seek event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_progress_sync_event() {
        let hub = StateHub::new();
        hub.publish(playing("a.mp3", 10.0)).await;

        let mut rx = hub.subscribe();
        hub.publish(playing("a.mp3", 11.0)).await;
        assert!(matches!(rx.try_recv(), Ok(StateEvent::ProgressSync { .. })));
    }

    #[tokio::test]
    async fn test_snapshot_returns_latest() {
        let hub = StateHub::new();
        hub.publish(playing("a.mp3", 42.0)).await;

        let snapshot = hub.snapshot().await;
        assert_eq!(snapshot.stream_url(), Some("a.mp3"));
        assert!((snapshot.progress - 42.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_refresh_request_is_remembered() {
        let hub = StateHub::new();
        hub.request_refresh();
        // must complete immediately because the request came in first
        hub.refresh_requested().await;
    }
}
