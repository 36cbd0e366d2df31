//! Playback state machine

use std::time::Duration;

use tracing::{debug, warn};

use super::{MediaPlayer, PlaybackState};
use crate::api::{AudioSource, Credentials};
use crate::Result;

/// Cadence at which the owner should call [`PlaybackController::tick`]
/// while a session is live (10 updates per second).
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(100);

/// Proof that a load was started, carrying the generation it belongs to.
///
/// A completion is only applied when its ticket's generation is still
/// current, so a fetch finishing after its session was superseded can never
/// transition the controller.
#[derive(Debug)]
pub struct LoadTicket {
    id: i64,
    generation: u64,
}

/// State machine driving one recording's playback and scrubbing.
///
/// Single-owner: all mutation goes through `&mut self`, so completions are
/// serialized with user-driven state changes by construction.
pub struct PlaybackController<P: MediaPlayer> {
    player: P,
    state: PlaybackState,
    progress: f64,
    generation: u64,
}

impl<P: MediaPlayer> PlaybackController<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            state: PlaybackState::Idle,
            progress: 0.0,
            generation: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Displayed progress fraction in [0, 1].
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Start loading a recording, tearing down any live session first.
    ///
    /// Tapping the recording that is already playing is a stop gesture:
    /// the session ends and no ticket is issued.
    pub fn begin_play(&mut self, id: i64) -> Option<LoadTicket> {
        let live = matches!(
            self.state,
            PlaybackState::Playing { .. } | PlaybackState::Scrubbing { .. }
        );
        if live && self.state.current_id() == Some(id) {
            debug!("Recording {} tapped again, stopping", id);
            self.stop();
            return None;
        }

        self.teardown();
        self.generation += 1;
        self.state = PlaybackState::Loading { id };
        debug!("Loading recording {}", id);

        Some(LoadTicket {
            id,
            generation: self.generation,
        })
    }

    /// Deliver the result of the audio fetch started by [`begin_play`].
    ///
    /// A stale ticket (the session was replaced or stopped while the fetch
    /// was in flight) is discarded without touching state. A fetch failure
    /// reverts to Idle and surfaces the error.
    ///
    /// [`begin_play`]: Self::begin_play
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<u8>>) -> Result<()> {
        if ticket.generation != self.generation
            || self.state != (PlaybackState::Loading { id: ticket.id })
        {
            debug!("Discarding stale load completion for recording {}", ticket.id);
            return Ok(());
        }

        let audio = match result {
            Ok(audio) => audio,
            Err(e) => {
                warn!("Audio fetch for recording {} failed: {}", ticket.id, e);
                self.state = PlaybackState::Idle;
                return Err(e);
            }
        };

        if let Err(e) = self.player.load(audio) {
            self.state = PlaybackState::Idle;
            return Err(e);
        }
        if let Err(e) = self.player.play() {
            self.state = PlaybackState::Idle;
            return Err(e);
        }

        self.progress = 0.0;
        self.state = PlaybackState::Playing { id: ticket.id };
        debug!("Recording {} playing", ticket.id);
        Ok(())
    }

    /// Fetch and play a recording: both phases of the load in one call.
    ///
    /// Dropping the returned future while the fetch is in flight cancels
    /// the load; the session stays Loading until replaced or stopped.
    pub async fn play(
        &mut self,
        id: i64,
        source: &dyn AudioSource,
        credentials: &Credentials,
    ) -> Result<()> {
        let Some(ticket) = self.begin_play(id) else {
            return Ok(());
        };
        let result = source.fetch_audio(id, credentials).await;
        self.finish_load(ticket, result)
    }

    /// Periodic progress update; call at [`PROGRESS_INTERVAL`] while live.
    ///
    /// Suppressed while scrubbing, and skipped entirely until the primitive
    /// reports a finite positive duration.
    pub fn tick(&mut self) {
        if !matches!(self.state, PlaybackState::Playing { .. }) {
            return;
        }
        let Some(duration) = self.player.duration() else {
            return;
        };
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.progress = (self.player.current_time() / duration).clamp(0.0, 1.0);
    }

    /// User began a drag gesture: freeze the displayed fraction while the
    /// primitive keeps playing underneath.
    pub fn begin_scrub(&mut self) {
        if let PlaybackState::Playing { id } = self.state {
            self.state = PlaybackState::Scrubbing { id };
        }
    }

    /// Gesture ended: issue exactly one seek at the target fraction, then
    /// resume accepting periodic updates.
    pub fn end_scrub(&mut self, fraction: f64) {
        let PlaybackState::Scrubbing { id } = self.state else {
            return;
        };
        self.seek(fraction);
        self.state = PlaybackState::Playing { id };
    }

    /// Seek to a fraction of the total duration.
    ///
    /// A no-op until the primitive reports a finite positive duration.
    pub fn seek(&mut self, fraction: f64) {
        let Some(duration) = self.player.duration() else {
            return;
        };
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        self.player.seek(fraction * duration);
        self.progress = fraction;
    }

    /// End the current session, pausing the primitive if it was engaged.
    pub fn stop(&mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        if matches!(
            self.state,
            PlaybackState::Playing { .. } | PlaybackState::Scrubbing { .. }
        ) {
            self.player.pause();
        }
        // Invalidate any in-flight load so its completion is discarded.
        self.generation += 1;
        self.progress = 0.0;
        self.state = PlaybackState::Idle;
    }
}

impl<P: MediaPlayer> Drop for PlaybackController<P> {
    fn drop(&mut self) {
        // Disposal must leave the primitive paused, not best-effort.
        self.teardown();
    }
}
