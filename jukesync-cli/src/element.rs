//! Logging implementations of the element traits.
//!
//! The monitor has no real audio output; it reports every decision the
//! sync controller makes, which is what you want when debugging why a
//! browser element stutters against a given server.

use jukesync_core::{AudioElement, Indicator, StreamControl, VolumeIcon};
use std::time::Duration;
use tracing::info;

const LOG_TARGET: &str = "jukesync::element";

/// Audio element that logs state transitions instead of producing sound
#[derive(Debug, Default)]
pub struct LoggingElement {
    source: Option<String>,
    position: Duration,
    playing: bool,
}

impl AudioElement for LoggingElement {
    fn source(&self) -> Option<String> {
        self.source.clone()
    }

    fn set_source(&mut self, url: &str) {
        info!(target: LOG_TARGET, "source -> {url}");
        self.source = Some(url.to_owned());
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn seek(&mut self, position: Duration) {
        info!(target: LOG_TARGET, "seek {:?} -> {:?}", self.position, position);
        self.position = position;
    }

    fn load(&mut self) {
        info!(target: LOG_TARGET, "load");
        self.playing = false;
    }

    fn play(&mut self) {
        if !self.playing {
            info!(target: LOG_TARGET, "play");
        }
        self.playing = true;
    }

    fn pause(&mut self) {
        if self.playing {
            info!(target: LOG_TARGET, "pause");
        }
        self.playing = false;
    }
}

/// Stream control that logs its visual state changes
#[derive(Debug, Default)]
pub struct LoggingControl {
    indicator: Option<Indicator>,
    icon: Option<VolumeIcon>,
}

impl StreamControl for LoggingControl {
    fn set_indicator(&mut self, indicator: Indicator) {
        if self.indicator != Some(indicator) {
            info!(target: LOG_TARGET, "indicator -> {indicator:?}");
        }
        self.indicator = Some(indicator);
    }

    fn set_icon(&mut self, icon: VolumeIcon) {
        if self.icon != Some(icon) {
            info!(target: LOG_TARGET, "icon -> {icon:?}");
        }
        self.icon = Some(icon);
    }
}
