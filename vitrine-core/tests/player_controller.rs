use std::sync::Arc;
use std::time::Duration;

use vitrine_core::player::{InitPhase, VideoPlayerController, derive_embed_url};
use vitrine_core::ports::{EmbedSurface, PlaybackEvent, TransportLabel};
use vitrine_core::testing::{
    HandleCommand, RecordingUi, ScriptedPlatform, StubPlayer, StubSurface,
};
use vitrine_core::tuning::PlayerTuning;

struct PlayerRig {
    platform: ScriptedPlatform,
    surface: StubSurface,
    ui: RecordingUi,
    player: VideoPlayerController,
}

fn rig_with(platform: ScriptedPlatform) -> PlayerRig {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let surface = StubSurface::new();
    let ui = RecordingUi::new();
    let player = VideoPlayerController::new(
        Arc::new(platform.clone()),
        Arc::new(surface.clone()),
        Arc::new(ui.clone()),
        PlayerTuning::default(),
    );
    PlayerRig {
        platform,
        surface,
        ui,
        player,
    }
}

fn rig() -> PlayerRig {
    rig_with(ScriptedPlatform::ready())
}

/// Past every armed delay and retry; paused time fast-forwards.
async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

fn sole_player(platform: &ScriptedPlatform) -> Arc<StubPlayer> {
    let players = platform.bound_players();
    assert_eq!(players.len(), 1, "expected exactly one bound player");
    players[0].clone()
}

fn pause_commands(player: &StubPlayer) -> usize {
    player
        .commands()
        .iter()
        .filter(|command| **command == HandleCommand::Pause)
        .count()
}

#[tokio::test(start_paused = true)]
async fn load_without_video_id_reports_false_and_touches_nothing() {
    let rig = rig();

    assert!(!rig.player.load_video("https://vimeo.com/about"));
    settle().await;

    assert!(rig.surface.history().is_empty());
    assert_eq!(rig.platform.bind_count(), 0);
    assert!(!rig.player.is_live());
    assert_eq!(rig.player.init_phase(), InitPhase::Idle);
    assert!(rig.ui.label_history().is_empty());
}

#[tokio::test(start_paused = true)]
async fn load_binds_a_player_and_starts_playback() {
    let rig = rig();
    rig.platform.set_default_duration(120.0);

    assert!(rig.player.load_video("https://vimeo.com/123456"));
    settle().await;

    let source = rig.surface.source().expect("embed source set");
    assert!(source.contains("player.vimeo.com/video/123456"));
    assert_eq!(rig.player.init_phase(), InitPhase::Ready);
    assert!(rig.player.is_live());

    let player = sole_player(&rig.platform);
    assert!(!player.is_paused());
    assert!((player.volume() - 1.0).abs() < f64::EPSILON);
    assert!(rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Pause);

    // The poll picks up position changes on its next tick.
    player.set_position(30.0);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(rig.ui.progress_percent(), 25.0);
    assert_eq!(rig.ui.time_label(), "0:30 / 2:00");
}

#[tokio::test(start_paused = true)]
async fn second_load_supersedes_the_first_session() {
    let rig = rig();

    assert!(rig.player.load_video("https://vimeo.com/111"));
    assert!(rig.player.load_video("https://vimeo.com/222"));
    settle().await;

    // The first session never reached the surface: its armed timer was
    // cancelled before the settle delay elapsed.
    let winner = derive_embed_url("https://vimeo.com/222").expect("derivable");
    assert_eq!(
        rig.surface.history(),
        vec![None, None, Some(winner.clone())]
    );
    assert_eq!(rig.surface.source(), Some(winner));
    assert_eq!(rig.platform.bind_count(), 1);
    assert!(rig.player.is_live());
}

#[tokio::test(start_paused = true)]
async fn stop_tears_down_and_is_idempotent() {
    let rig = rig();
    rig.platform.set_default_duration(90.0);
    rig.player.load_video("https://vimeo.com/123456");
    settle().await;
    let player = sole_player(&rig.platform);
    assert!(rig.ui.is_playing());

    rig.player.stop();
    settle().await;

    assert!(!rig.player.is_live());
    assert_eq!(rig.player.init_phase(), InitPhase::Idle);
    assert_eq!(rig.surface.source(), None);
    assert!(!rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Play);
    assert_eq!(rig.ui.progress_percent(), 0.0);
    assert_eq!(rig.ui.time_label(), "0:00 / 0:00");
    assert_eq!(pause_commands(&player), 1);

    rig.player.stop();
    settle().await;

    assert!(!rig.player.is_live());
    assert_eq!(rig.surface.source(), None);
    assert_eq!(rig.ui.transport_label(), TransportLabel::Play);
    assert_eq!(rig.ui.time_label(), "0:00 / 0:00");
    // No second best-effort pause: there was no handle left to pause.
    assert_eq!(pause_commands(&player), 1);
}

#[tokio::test(start_paused = true)]
async fn init_waits_for_the_platform_api_with_one_retry_scheduled() {
    let rig = rig_with(ScriptedPlatform::unavailable());

    rig.player.load_video("https://vimeo.com/123456");
    // First attempt runs after the settle and arm delays and fails.
    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(rig.player.init_phase(), InitPhase::Attempting(2));
    assert_eq!(rig.platform.bind_count(), 0);
    assert!(!rig.player.is_live());
    // Indicators were reset by the load and never touched again.
    assert_eq!(rig.ui.label_history(), vec![TransportLabel::Play]);

    rig.platform.set_api_ready(true);
    tokio::time::sleep(Duration::from_millis(500)).await;

    assert_eq!(rig.player.init_phase(), InitPhase::Ready);
    assert_eq!(rig.platform.bind_count(), 1);
    assert!(rig.player.is_live());
}

#[tokio::test(start_paused = true)]
async fn init_gives_up_after_the_attempt_budget() {
    let rig = rig_with(ScriptedPlatform::unavailable());
    let budget = PlayerTuning::default().max_init_attempts as usize;

    rig.player.load_video("https://vimeo.com/123456");
    settle().await;

    assert_eq!(rig.player.init_phase(), InitPhase::GaveUp);
    assert_eq!(rig.platform.ready_checks(), budget);
    assert_eq!(rig.platform.bind_count(), 0);
    assert!(!rig.player.is_live());
    // The embed stays loaded; only the custom controls are missing.
    assert!(rig.surface.source().is_some());
    assert_eq!(rig.ui.label_history(), vec![TransportLabel::Play]);
    assert_eq!(rig.ui.progress_percent(), 0.0);
}

#[tokio::test(start_paused = true)]
async fn redundant_init_collapses_into_the_live_session() {
    let rig = rig();
    rig.player.load_video("https://vimeo.com/123456");
    settle().await;
    assert_eq!(rig.platform.bind_count(), 1);

    rig.player.init();
    settle().await;

    assert_eq!(rig.platform.bind_count(), 1);
    assert_eq!(rig.player.init_phase(), InitPhase::Ready);
}

#[tokio::test(start_paused = true)]
async fn autoplay_rejection_leaves_the_player_paused() {
    let rig = rig();
    rig.platform.set_default_duration(60.0);
    rig.platform.block_autoplay();

    rig.player.load_video("https://vimeo.com/123456");
    settle().await;

    assert_eq!(rig.player.init_phase(), InitPhase::Ready);
    assert!(rig.player.is_live());

    let player = sole_player(&rig.platform);
    assert!(player.commands().contains(&HandleCommand::Play));
    assert!(player.is_paused());
    assert!(!rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Play);
}

#[tokio::test(start_paused = true)]
async fn toggle_round_trips_between_play_and_pause() {
    let rig = rig();
    rig.platform.set_default_duration(60.0);
    rig.player.load_video("https://vimeo.com/123456");
    settle().await;
    let player = sole_player(&rig.platform);
    assert!(rig.ui.is_playing());

    rig.player.toggle_play_pause().await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(player.is_paused());
    assert!(!rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Play);

    rig.player.toggle_play_pause().await;
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!player.is_paused());
    assert!(rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Pause);
}

#[tokio::test(start_paused = true)]
async fn ended_rewinds_pauses_and_stops_the_poll() {
    let rig = rig();
    rig.platform.set_default_duration(60.0);
    rig.player.load_video("https://vimeo.com/123456");
    settle().await;
    let player = sole_player(&rig.platform);
    player.set_position(59.0);

    player.emit(PlaybackEvent::Ended);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(player.commands().contains(&HandleCommand::SetTime(0.0)));
    assert_eq!(player.position(), 0.0);
    assert!(player.is_paused());
    assert!(!rig.ui.is_playing());
    assert_eq!(rig.ui.transport_label(), TransportLabel::Play);
}

#[tokio::test(start_paused = true)]
async fn seek_maps_the_fraction_through_the_cached_duration() {
    let rig = rig();
    rig.platform.set_default_duration(100.0);
    rig.player.load_video("https://vimeo.com/123456");
    settle().await;
    let player = sole_player(&rig.platform);
    assert_eq!(rig.player.cached_duration(), 100.0);

    rig.player.seek_to_fraction(0.4).await;

    let sought = player.commands().iter().any(|command| {
        matches!(command, HandleCommand::SetTime(t) if (t - 40.0).abs() < 1e-9)
    });
    assert!(sought, "expected a seek to 40s, got {:?}", player.commands());
}

#[tokio::test(start_paused = true)]
async fn seek_and_toggle_without_a_session_are_no_ops() {
    let rig = rig();

    rig.player.seek_to_fraction(0.5).await;
    rig.player.toggle_play_pause().await;
    settle().await;

    assert_eq!(rig.platform.bind_count(), 0);
    assert!(rig.surface.history().is_empty());
    assert!(rig.ui.label_history().is_empty());
}
