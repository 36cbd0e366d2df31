//! Playback engine for fetched recordings
//!
//! Owns "what is currently playing" and the scrub/seek behavior, independent
//! of any UI toolkit. The actual decoding and rendering is delegated to a
//! platform [`MediaPlayer`] primitive.

mod controller;

pub use controller::{LoadTicket, PlaybackController, PROGRESS_INTERVAL};

use crate::Result;

/// Platform media primitive: consumes a playable byte buffer and exposes
/// transport controls. Implementations also activate whatever global audio
/// routing their platform needs when a buffer is loaded.
pub trait MediaPlayer {
    /// Hand a complete playable file to the primitive.
    fn load(&mut self, audio: Vec<u8>) -> Result<()>;

    /// Start or resume playback from the current position.
    fn play(&mut self) -> Result<()>;

    /// Pause playback, keeping the position.
    fn pause(&mut self);

    /// Jump to an absolute position in seconds.
    fn seek(&mut self, seconds: f64);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total duration in seconds, `None` until the primitive knows it.
    fn duration(&self) -> Option<f64>;
}

/// Observable state of a [`PlaybackController`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// No session
    Idle,
    /// Audio fetch in flight for the target recording
    Loading { id: i64 },
    /// Primitive active, progress advancing
    Playing { id: i64 },
    /// User-driven seek gesture in progress; periodic updates suppressed
    Scrubbing { id: i64 },
}

impl PlaybackState {
    /// Identifier of the session's recording, if any.
    pub fn current_id(&self) -> Option<i64> {
        match self {
            Self::Idle => None,
            Self::Loading { id } | Self::Playing { id } | Self::Scrubbing { id } => Some(*id),
        }
    }
}
