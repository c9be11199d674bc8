use crate::element::{AudioElement, Indicator, StateRefresh, StreamControl, VolumeIcon};
use crate::playback::PlaybackState;
use crate::time::drift;
use std::time::Duration;
use tracing::debug;

/// Maximum tolerated drift between the server-implied position and the
/// element's actual position before a corrective seek is issued.
///
/// The server reports coarse progress; constantly chasing it with small
/// seeks produces audible cuts, so correction only kicks in beyond this
/// dead-band.
pub const SEEK_DEADBAND: Duration = Duration::from_secs(1);

/// Keeps a single audio output element consistent with the latest known
/// playback state.
///
/// Element availability is decided once at construction: a controller built
/// without an element stays a no-op for its whole lifetime. The only state
/// owned here is the `stream_active` flag, which changes exclusively
/// through [`toggle_stream`](Self::toggle_stream).
pub struct StreamSync<E, C, R> {
    element: Option<E>,
    control: C,
    refresh: R,
    stream_active: bool,
}

impl<E, C, R> StreamSync<E, C, R>
where
    E: AudioElement,
    C: StreamControl,
    R: StateRefresh,
{
    /// Create a controller for the given element and control handles.
    ///
    /// Pass `None` for the element on pages without an audio output; every
    /// subsequent [`sync`](Self::sync) call is then a no-op. Streaming
    /// starts disabled and the control shows the muted icon.
    pub fn new(element: Option<E>, mut control: C, refresh: R) -> Self {
        control.set_icon(VolumeIcon::Muted);
        Self {
            element,
            control,
            refresh,
            stream_active: false,
        }
    }

    /// Whether an audio element exists to sync against
    #[must_use]
    pub const fn stream_available(&self) -> bool {
        self.element.is_some()
    }

    /// Whether the user has enabled local audio output
    #[must_use]
    pub const fn stream_active(&self) -> bool {
        self.stream_active
    }

    /// Sync the output element with the newest state from the server.
    ///
    /// Call this whenever the shared state changes. All degenerate inputs
    /// (missing element, missing song, missing stream URL) are handled as
    /// guarded no-ops, never as errors.
    pub fn sync(&mut self, state: &PlaybackState) {
        let Some(element) = self.element.as_mut() else {
            return;
        };

        // a song that provided no stream url needs attention
        if state.current_song.is_some() && state.stream_url().is_none() {
            self.control.set_indicator(Indicator::Attention);
        } else {
            self.control.set_indicator(Indicator::Normal);
        }

        let Some(url) = state.stream_url() else {
            element.pause();
            return;
        };
        if state.paused || !self.stream_active {
            element.pause();
            return;
        }

        if element.source().as_deref() != Some(url) {
            debug!("Switching stream source to {url}");
            element.set_source(url);
            element.load();
        }

        let target = state.target_position();
        let actual = element.position();
        if drift(target, actual) > SEEK_DEADBAND {
            // only seek if the deviation is too big to avoid unnecessary cuts
            debug!("Correcting position drift: {actual:?} -> {target:?}");
            element.seek(target);
        }

        // loading pauses the element, play whenever streaming should run
        element.play();
    }

    /// Toggle local streaming on or off, as triggered by the user tapping
    /// the stream control.
    ///
    /// Alternates strictly between enabled and disabled. Enabling requests
    /// a fresh state snapshot from the server; both directions immediately
    /// re-sync the element so the new flag takes effect.
    pub fn toggle_stream(&mut self, state: &PlaybackState) {
        if self.stream_active {
            self.stream_active = false;
            self.control.set_icon(VolumeIcon::Muted);
        } else {
            self.stream_active = true;
            self.control.set_icon(VolumeIcon::Unmuted);
            self.refresh.request_refresh();
        }
        debug!(active = self.stream_active, "Stream toggled");
        self.sync(state);
    }

    /// The element handle, if one was attached
    pub const fn element(&self) -> Option<&E> {
        self.element.as_ref()
    }

    /// The stream control handle
    pub const fn control(&self) -> &C {
        &self.control
    }
}
