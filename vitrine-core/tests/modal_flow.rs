use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use vitrine_core::modal::ModalController;
use vitrine_core::player::VideoPlayerController;
use vitrine_core::ports::EmbedSurface;
use vitrine_core::testing::{
    RecordingOverlay, RecordingScroll, RecordingUi, ScriptedPlatform,
    StubSurface,
};
use vitrine_core::tuning::PlayerTuning;
use vitrine_model::{WorkItem, WorkItemId};

struct ModalRig {
    platform: ScriptedPlatform,
    surface: StubSurface,
    overlay: RecordingOverlay,
    scroll: RecordingScroll,
    player: VideoPlayerController,
    modal: ModalController,
}

fn rig() -> ModalRig {
    let platform = ScriptedPlatform::ready();
    let surface = StubSurface::new();
    let overlay = RecordingOverlay::new();
    let scroll = RecordingScroll::new();
    let player = VideoPlayerController::new(
        Arc::new(platform.clone()),
        Arc::new(surface.clone()),
        Arc::new(RecordingUi::new()),
        PlayerTuning::default(),
    );
    let modal = ModalController::new(
        Arc::new(overlay.clone()),
        Arc::new(scroll.clone()),
    );
    modal.attach_player(player.clone());
    ModalRig {
        platform,
        surface,
        overlay,
        scroll,
        player,
        modal,
    }
}

fn work_entry(id: &str, video_url: Option<&str>) -> Result<WorkItem> {
    Ok(WorkItem {
        id: WorkItemId::new(id)?,
        brand: "Studio".to_string(),
        name: "Reel".to_string(),
        slide: Some(3),
        image_url: None,
        video_url: video_url.map(str::to_owned),
    })
}

async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}

#[tokio::test(start_paused = true)]
async fn open_then_close_round_trips_every_surface() -> Result<()> {
    let rig = rig();
    let entry = work_entry("work-1", Some("https://vimeo.com/123456"))?;

    rig.modal.open(&entry);
    settle().await;

    assert!(rig.modal.is_open());
    assert_eq!(
        rig.modal.active_work(),
        Some("https://vimeo.com/123456".to_string())
    );
    assert!(rig.overlay.is_visible());
    assert_eq!(
        rig.overlay.captions(),
        vec![("Studio".to_string(), "Reel".to_string())]
    );
    assert_eq!(rig.overlay.slides(), vec![Some(3)]);
    assert_eq!(rig.scroll.log(), vec!["stop".to_string()]);
    let source = rig.surface.source().expect("embed source set");
    assert!(source.contains("123456"));
    assert!(rig.player.is_live());

    rig.modal.close();
    settle().await;

    assert!(!rig.modal.is_open());
    assert_eq!(rig.modal.active_work(), None);
    assert!(!rig.overlay.is_visible());
    assert_eq!(
        rig.scroll.log(),
        vec!["stop".to_string(), "start".to_string()]
    );
    assert_eq!(rig.surface.source(), None);
    assert!(!rig.player.is_live());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn closing_twice_resumes_scrolling_once() -> Result<()> {
    let rig = rig();
    let entry = work_entry("work-1", Some("https://vimeo.com/123456"))?;

    rig.modal.open(&entry);
    settle().await;
    rig.modal.close();
    rig.modal.close();
    settle().await;
    rig.modal.close();
    settle().await;

    assert_eq!(rig.scroll.start_count(), 1);
    assert!(!rig.overlay.is_visible());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn entries_without_video_never_open_a_session() -> Result<()> {
    let rig = rig();

    rig.modal.open(&work_entry("work-1", None)?);
    rig.modal.open(&work_entry("work-2", Some("  "))?);
    settle().await;

    assert!(!rig.modal.is_open());
    assert!(!rig.overlay.is_visible());
    assert!(rig.overlay.captions().is_empty());
    assert!(rig.scroll.log().is_empty());
    assert!(rig.surface.history().is_empty());
    assert_eq!(rig.platform.bind_count(), 0);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reopening_switches_to_the_new_entry() -> Result<()> {
    let rig = rig();

    rig.modal
        .open(&work_entry("work-1", Some("https://vimeo.com/111"))?);
    settle().await;
    rig.modal
        .open(&work_entry("work-2", Some("https://vimeo.com/222"))?);
    settle().await;

    assert!(rig.modal.is_open());
    assert_eq!(
        rig.modal.active_work(),
        Some("https://vimeo.com/222".to_string())
    );
    // Both opens locked scrolling; nothing resumed in between.
    assert_eq!(rig.scroll.stop_count(), 2);
    assert_eq!(rig.scroll.start_count(), 0);
    let source = rig.surface.source().expect("embed source set");
    assert!(source.contains("222"));
    assert!(rig.player.is_live());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn undecipherable_video_url_keeps_the_modal_open_without_playback() -> Result<()> {
    let rig = rig();

    rig.modal
        .open(&work_entry("work-1", Some("https://vimeo.com/profile"))?);
    settle().await;

    assert!(rig.modal.is_open());
    assert!(rig.overlay.is_visible());
    assert_eq!(rig.scroll.stop_count(), 1);
    assert!(rig.surface.history().is_empty());
    assert!(!rig.player.is_live());
    Ok(())
}
