use crate::time::{drift, progress_to_position};
use std::time::Duration;

/// Playback state as reported by the jukebox server.
///
/// The server owns the queue and the actual playback; this struct is a
/// read-only snapshot of what it last told us.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// The song currently playing (None if the queue is idle)
    pub current_song: Option<Song>,
    /// Whether the server has paused playback
    pub paused: bool,
    /// Server-reported playback progress as a percentage (0-100)
    pub progress: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_song: None,
            paused: true,
            progress: 0.0,
        }
    }
}

impl PlaybackState {
    /// Create a new playback state snapshot
    #[must_use]
    pub fn new(current_song: Option<Song>, paused: bool, progress: f64) -> Self {
        Self {
            current_song,
            paused,
            progress,
        }
    }

    /// The stream URL of the current song, if the song exists and provided one
    #[must_use]
    pub fn stream_url(&self) -> Option<&str> {
        self.current_song
            .as_ref()
            .and_then(|song| song.stream_url.as_deref())
    }

    /// Absolute position within the current song implied by the progress
    /// percentage.
    ///
    /// Returns `Duration::ZERO` when nothing is playing. The result is
    /// always clamped to the song's duration.
    #[must_use]
    pub fn target_position(&self) -> Duration {
        self.current_song
            .as_ref()
            .map_or(Duration::ZERO, |song| {
                progress_to_position(self.progress, song.duration)
            })
    }

    /// Check if the current song changed between two snapshots.
    ///
    /// Songs are compared by stream URL, the only identity the server
    /// exposes at this layer.
    #[must_use]
    pub fn song_changed(&self, other: &Self) -> bool {
        match (&self.current_song, &other.current_song) {
            (Some(a), Some(b)) => a.stream_url != b.stream_url,
            (None, None) => false,
            _ => true,
        }
    }

    /// Check if the pause flag flipped between two snapshots
    #[must_use]
    pub const fn pause_changed(&self, other: &Self) -> bool {
        self.paused != other.paused
    }

    /// Check if the reported position jumped beyond `threshold` between two
    /// snapshots of the same song (a seek on the server side).
    #[must_use]
    pub fn position_jumped(&self, other: &Self, threshold: Duration) -> bool {
        if self.song_changed(other) {
            return false;
        }
        drift(self.target_position(), other.target_position()) > threshold
    }
}

/// A song entry as reported by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Address the audio element streams from (None if the song cannot be
    /// streamed, e.g. a local file the server refuses to serve)
    pub stream_url: Option<String>,
    /// Total song duration
    pub duration: Duration,
}

impl Song {
    /// Create a song with a stream URL
    #[must_use]
    pub fn streamable(stream_url: impl Into<String>, duration: Duration) -> Self {
        Self {
            stream_url: Some(stream_url.into()),
            duration,
        }
    }

    /// Create a song the server cannot stream
    #[must_use]
    pub const fn unstreamable(duration: Duration) -> Self {
        Self {
            stream_url: None,
            duration,
        }
    }
}
