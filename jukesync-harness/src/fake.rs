//! Recording fakes for the core element traits.
//!
//! Every operation the sync controller can perform is counted, so tests
//! can assert not just the final element state but exactly how many source
//! assignments, loads, seeks, and play/pause calls it took to get there.

use jukesync_core::{AudioElement, Indicator, StateRefresh, StreamControl, VolumeIcon};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Audio element fake that records every operation
#[derive(Debug, Default)]
pub struct FakeAudioElement {
    /// Currently assigned source
    pub source: Option<String>,
    /// Current playback position
    pub position: Duration,
    /// Whether the element is playing
    pub playing: bool,
    /// Number of `set_source` calls
    pub source_sets: u32,
    /// Number of `load` calls
    pub loads: u32,
    /// Number of `seek` calls
    pub seeks: u32,
    /// Number of `play` calls
    pub plays: u32,
    /// Number of `pause` calls
    pub pauses: u32,
}

impl FakeAudioElement {
    /// An element with a source already assigned and a position reached
    #[must_use]
    pub fn with_source(url: impl Into<String>, position: Duration) -> Self {
        Self {
            source: Some(url.into()),
            position,
            ..Self::default()
        }
    }
}

impl AudioElement for FakeAudioElement {
    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn set_source(&mut self, url: &str) {
        self.source = Some(url.to_owned());
        self.source_sets += 1;
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, position: Duration) {
        self.position = position;
        self.seeks += 1;
    }

    fn load(&mut self) {
        // loading resets and pauses, like a media element
        self.playing = false;
        self.loads += 1;
    }

    fn play(&mut self) {
        self.playing = true;
        self.plays += 1;
    }

    fn pause(&mut self) {
        self.playing = false;
        self.pauses += 1;
    }
}

/// Stream control fake that keeps the full history of visual changes
#[derive(Debug, Default)]
pub struct FakeControl {
    /// All indicator values set, in order
    pub indicators: Vec<Indicator>,
    /// All icon values set, in order
    pub icons: Vec<VolumeIcon>,
}

impl FakeControl {
    /// The most recently set indicator
    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        self.indicators.last().copied()
    }

    /// The most recently set icon
    #[must_use]
    pub fn icon(&self) -> Option<VolumeIcon> {
        self.icons.last().copied()
    }
}

impl StreamControl for FakeControl {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicators.push(indicator);
    }

    fn set_icon(&mut self, icon: VolumeIcon) {
        self.icons.push(icon);
    }
}

/// Refresh fake counting requests through a shared handle.
///
/// The fake itself moves into the sync controller; keep the
/// [`handle`](Self::handle) around to read the count afterwards.
#[derive(Debug, Default)]
pub struct FakeRefresh {
    requests: Arc<AtomicU32>,
}

impl FakeRefresh {
    /// Shared counter of refresh requests
    #[must_use]
    pub fn handle(&self) -> Arc<AtomicU32> {
        Arc::clone(&self.requests)
    }
}

impl StateRefresh for FakeRefresh {
    fn request_refresh(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_element_records_operations() {
        let mut element = FakeAudioElement::default();
        element.set_source("a.mp3");
        element.load();
        element.seek(Duration::from_secs(5));
        element.play();
        element.pause();

        assert_eq!(element.source_sets, 1);
        assert_eq!(element.loads, 1);
        assert_eq!(element.seeks, 1);
        assert_eq!(element.plays, 1);
        assert_eq!(element.pauses, 1);
        assert_eq!(element.position, Duration::from_secs(5));
        assert!(!element.playing);
    }

    #[test]
    fn test_fake_control_keeps_history() {
        let mut control = FakeControl::default();
        control.set_icon(VolumeIcon::Muted);
        control.set_icon(VolumeIcon::Unmuted);
        control.set_indicator(Indicator::Attention);

        assert_eq!(control.icon(), Some(VolumeIcon::Unmuted));
        assert_eq!(control.indicator(), Some(Indicator::Attention));
        assert_eq!(control.icons.len(), 2);
    }

    #[test]
    fn test_fake_refresh_counts_through_handle() {
        let refresh = FakeRefresh::default();
        let handle = refresh.handle();
        refresh.request_refresh();
        refresh.request_refresh();
        assert_eq!(handle.load(Ordering::SeqCst), 2);
    }
}
