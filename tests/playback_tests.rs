use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use callbox::api::{AudioSource, Credentials};
use callbox::playback::{MediaPlayer, PlaybackController, PlaybackState};
use callbox::CallboxError;

/// Scripted stand-in for the platform media primitive.
#[derive(Default)]
struct PlayerInner {
    loaded: Vec<Vec<u8>>,
    playing: bool,
    position: f64,
    duration: Option<f64>,
    seeks: Vec<f64>,
    pauses: usize,
}

#[derive(Clone, Default)]
struct FakePlayer(Arc<Mutex<PlayerInner>>);

impl FakePlayer {
    fn with_duration(seconds: f64) -> Self {
        let player = Self::default();
        player.inner().duration = Some(seconds);
        player
    }

    fn inner(&self) -> MutexGuard<'_, PlayerInner> {
        self.0.lock().unwrap()
    }
}

impl MediaPlayer for FakePlayer {
    fn load(&mut self, audio: Vec<u8>) -> callbox::Result<()> {
        self.inner().loaded.push(audio);
        Ok(())
    }

    fn play(&mut self) -> callbox::Result<()> {
        self.inner().playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut inner = self.inner();
        inner.playing = false;
        inner.pauses += 1;
    }

    fn seek(&mut self, seconds: f64) {
        let mut inner = self.inner();
        inner.position = seconds;
        inner.seeks.push(seconds);
    }

    fn current_time(&self) -> f64 {
        self.inner().position
    }

    fn duration(&self) -> Option<f64> {
        self.inner().duration
    }
}

fn playing_controller(player: &FakePlayer, id: i64) -> PlaybackController<FakePlayer> {
    let mut controller = PlaybackController::new(player.clone());
    let ticket = controller.begin_play(id).expect("load should start");
    controller
        .finish_load(ticket, Ok(vec![0u8; 64]))
        .expect("load should complete");
    controller
}

#[test]
fn load_completion_starts_playback_from_zero() {
    let player = FakePlayer::with_duration(120.0);
    let controller = playing_controller(&player, 7);

    assert_eq!(controller.state(), PlaybackState::Playing { id: 7 });
    assert_eq!(controller.progress(), 0.0);
    assert!(player.inner().playing);
    assert_eq!(player.inner().loaded.len(), 1);
}

#[test]
fn stale_completion_for_superseded_id_is_discarded() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = PlaybackController::new(player.clone());

    let ticket_old = controller.begin_play(7).expect("first load should start");
    let ticket_new = controller.begin_play(42).expect("second load should start");

    // The id=7 fetch finishes after play(42) was issued: it must not win.
    controller
        .finish_load(ticket_old, Ok(vec![7u8; 32]))
        .expect("stale completion is silently dropped");
    assert_eq!(controller.state(), PlaybackState::Loading { id: 42 });
    assert!(player.inner().loaded.is_empty());

    controller
        .finish_load(ticket_new, Ok(vec![42u8; 32]))
        .expect("current completion applies");
    assert_eq!(controller.state(), PlaybackState::Playing { id: 42 });
    assert_eq!(player.inner().loaded, vec![vec![42u8; 32]]);
}

#[test]
fn completion_after_stop_is_discarded() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = PlaybackController::new(player.clone());

    let ticket = controller.begin_play(7).expect("load should start");
    controller.stop();

    controller
        .finish_load(ticket, Ok(vec![1u8; 16]))
        .expect("completion after stop is silently dropped");

    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(player.inner().loaded.is_empty());
}

#[test]
fn failed_load_reverts_to_idle() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = PlaybackController::new(player.clone());

    let ticket = controller.begin_play(9).expect("load should start");
    let err = controller
        .finish_load(ticket, Err(CallboxError::Transport("connection reset".into())))
        .unwrap_err();

    assert!(matches!(err, CallboxError::Transport(_)));
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(player.inner().loaded.is_empty());
}

#[test]
fn tapping_playing_recording_again_stops_it() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = playing_controller(&player, 7);

    assert!(controller.begin_play(7).is_none());
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert_eq!(player.inner().pauses, 1);
    assert!(!player.inner().playing);
}

#[test]
fn replacing_session_pauses_previous_playback() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = playing_controller(&player, 7);

    let ticket = controller.begin_play(8).expect("new load should start");
    assert_eq!(player.inner().pauses, 1);

    controller
        .finish_load(ticket, Ok(vec![8u8; 16]))
        .expect("load should complete");
    assert_eq!(controller.state(), PlaybackState::Playing { id: 8 });
}

#[test]
fn tick_tracks_primitive_position() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = playing_controller(&player, 7);

    player.inner().position = 30.0;
    controller.tick();
    assert_eq!(controller.progress(), 0.25);

    // Past-the-end positions clamp to 1.
    player.inner().position = 300.0;
    controller.tick();
    assert_eq!(controller.progress(), 1.0);
}

#[test]
fn tick_is_skipped_until_duration_is_known() {
    let player = FakePlayer::default();
    let mut controller = playing_controller(&player, 7);

    player.inner().position = 30.0;
    controller.tick();
    assert_eq!(controller.progress(), 0.0);

    player.inner().duration = Some(0.0);
    controller.tick();
    assert_eq!(controller.progress(), 0.0);
}

#[test]
fn scrub_suppresses_ticks_and_issues_exactly_one_seek() {
    let player = FakePlayer::with_duration(120.0);
    let mut controller = playing_controller(&player, 7);

    controller.begin_scrub();
    assert_eq!(controller.state(), PlaybackState::Scrubbing { id: 7 });

    // Primitive keeps advancing underneath, but the displayed fraction
    // must not move during the gesture.
    player.inner().position = 90.0;
    controller.tick();
    assert_eq!(controller.progress(), 0.0);

    controller.end_scrub(0.5);
    assert_eq!(controller.state(), PlaybackState::Playing { id: 7 });
    assert_eq!(player.inner().seeks, vec![60.0]);
    assert_eq!(controller.progress(), 0.5);
}

#[test]
fn seek_is_noop_without_positive_duration() {
    let player = FakePlayer::default();
    let mut controller = playing_controller(&player, 7);

    controller.seek(0.5);
    assert!(player.inner().seeks.is_empty());

    player.inner().duration = Some(0.0);
    controller.seek(0.5);
    assert!(player.inner().seeks.is_empty());
}

#[test]
fn seek_fraction_is_clamped() {
    let player = FakePlayer::with_duration(100.0);
    let mut controller = playing_controller(&player, 7);

    controller.seek(1.5);
    controller.seek(-0.5);
    assert_eq!(player.inner().seeks, vec![100.0, 0.0]);
}

#[test]
fn dropping_controller_pauses_live_playback() {
    let player = FakePlayer::with_duration(120.0);
    {
        let _controller = playing_controller(&player, 7);
    }
    assert_eq!(player.inner().pauses, 1);
    assert!(!player.inner().playing);
}

/// Audio source serving a canned buffer, no network involved.
struct FixedSource(Vec<u8>);

#[async_trait]
impl AudioSource for FixedSource {
    async fn fetch_audio(&self, _id: i64, _credentials: &Credentials) -> callbox::Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct FailingSource;

#[async_trait]
impl AudioSource for FailingSource {
    async fn fetch_audio(&self, _id: i64, _credentials: &Credentials) -> callbox::Result<Vec<u8>> {
        Err(CallboxError::ApiStatus("audio fetch returned status 'error'".into()))
    }
}

#[tokio::test]
async fn play_drives_fetch_and_playback() {
    let player = FakePlayer::with_duration(60.0);
    let mut controller = PlaybackController::new(player.clone());
    let credentials = Credentials::new("tok", "sec").unwrap();

    controller
        .play(5, &FixedSource(vec![9u8; 128]), &credentials)
        .await
        .expect("play should succeed");

    assert_eq!(controller.state(), PlaybackState::Playing { id: 5 });
    assert_eq!(player.inner().loaded, vec![vec![9u8; 128]]);
}

#[tokio::test]
async fn play_failure_surfaces_error_and_reverts_to_idle() {
    let player = FakePlayer::with_duration(60.0);
    let mut controller = PlaybackController::new(player.clone());
    let credentials = Credentials::new("tok", "sec").unwrap();

    let err = controller
        .play(5, &FailingSource, &credentials)
        .await
        .unwrap_err();

    assert!(matches!(err, CallboxError::ApiStatus(_)));
    assert_eq!(controller.state(), PlaybackState::Idle);
    assert!(player.inner().loaded.is_empty());
}
