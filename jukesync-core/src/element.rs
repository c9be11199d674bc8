//! Output element abstractions.
//!
//! The sync controller never touches a concrete audio backend; it drives
//! whatever implements the minimal capability set here. Implementations
//! range from a real media element binding to the recording fakes used in
//! tests.

use std::time::Duration;

/// Capability set of a single audio output element.
///
/// Mirrors the behavior of a streaming media element: assigning a source
/// does not start playback, and a `load` implicitly pauses the element
/// until `play` is called again.
pub trait AudioElement {
    /// Currently assigned source address, if any
    fn source(&self) -> Option<String>;

    /// Assign a new source address. Does not start loading by itself.
    fn set_source(&mut self, url: &str);

    /// Current playback position within the loaded source
    fn position(&self) -> Duration;

    /// Jump to an absolute position
    fn seek(&mut self, position: Duration);

    /// (Re)load the assigned source. Pauses the element as a side effect.
    fn load(&mut self);

    /// Start or resume playback
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);
}

/// Visual state of the stream toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Everything consistent, regular styling
    Normal,
    /// A song is playing but cannot be streamed; draw attention
    Attention,
}

/// Icon shown on the stream toggle control.
///
/// The two states are mutually exclusive; setting one clears the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeIcon {
    Muted,
    Unmuted,
}

/// UI control the user taps to enable or disable local streaming
pub trait StreamControl {
    /// Set the attention indicator on the control
    fn set_indicator(&mut self, indicator: Indicator);

    /// Set the volume icon on the control
    fn set_icon(&mut self, icon: VolumeIcon);
}

/// Handle for requesting an out-of-cycle state refresh from the server.
///
/// Invoked when the user newly enables streaming so the element syncs
/// against fresh state instead of a possibly stale snapshot.
pub trait StateRefresh {
    fn request_refresh(&self);
}
