//! Modal session controller.
//!
//! A modal session pairs three concerns that must move together:
//! overlay visibility, the page scroll lock, and the video player
//! lifecycle. Opening shows the overlay, stops the scroll engine, and
//! loads the entry's video; closing is the exact inverse and is safe
//! to call any number of times.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};
use vitrine_model::WorkItem;

use crate::player::VideoPlayerController;
use crate::ports::{OverlaySurface, ScrollEngine};

/// Whether a modal session is in progress, and for which entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open {
        /// Source video URL of the entry the session was opened for.
        active_work: String,
    },
}

/// Drives the work-item modal: one session at a time, scroll locked
/// for exactly as long as the overlay is visible.
pub struct ModalController {
    overlay: Arc<dyn OverlaySurface>,
    scroll: Arc<dyn ScrollEngine>,
    player: Mutex<Option<VideoPlayerController>>,
    state: Mutex<ModalState>,
}

impl std::fmt::Debug for ModalController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalController")
            .field("state", &self.lock_state())
            .finish()
    }
}

impl ModalController {
    pub fn new(
        overlay: Arc<dyn OverlaySurface>,
        scroll: Arc<dyn ScrollEngine>,
    ) -> Self {
        Self {
            overlay,
            scroll,
            player: Mutex::new(None),
            state: Mutex::new(ModalState::Closed),
        }
    }

    /// Wire in the player controller the modal drives. Called once at
    /// page assembly, before any session can open.
    pub fn attach_player(&self, player: VideoPlayerController) {
        *self.lock_player() = Some(player);
    }

    /// Open a session for one work entry. Ignored when the entry has
    /// no playable video URL or no player is attached. The session
    /// opens even if the video itself fails to load; the overlay then
    /// shows its static fallback.
    pub fn open(&self, work: &WorkItem) {
        let source = match work.video_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => url.to_owned(),
            _ => {
                debug!("modal open ignored, {} has no video", work.id);
                return;
            }
        };
        let player = self.lock_player().clone();
        let Some(player) = player else {
            warn!("modal open ignored, no player attached");
            return;
        };

        debug!("opening modal for {}", work.id);
        self.overlay.set_caption(&work.brand, &work.name);
        self.overlay
            .set_active_slide(work.slide.map(|slide| slide as usize));
        self.overlay.show();
        self.scroll.stop();
        *self.lock_state() = ModalState::Open {
            active_work: source.clone(),
        };

        if !player.load_video(&source) {
            debug!("modal stays open without playback for {}", work.id);
        }
    }

    /// Close the current session. Idempotent: only the transition out
    /// of [`ModalState::Open`] stops the player, hides the overlay,
    /// and resumes the scroll engine.
    pub fn close(&self) {
        {
            let mut state = self.lock_state();
            if *state == ModalState::Closed {
                return;
            }
            *state = ModalState::Closed;
        }
        debug!("closing modal");

        if let Some(player) = self.lock_player().as_ref() {
            player.stop();
        }
        self.overlay.hide();
        self.scroll.start();
    }

    pub fn is_open(&self) -> bool {
        matches!(&*self.lock_state(), ModalState::Open { .. })
    }

    /// Source URL of the open session, if any.
    pub fn active_work(&self) -> Option<String> {
        match &*self.lock_state() {
            ModalState::Open { active_work } => Some(active_work.clone()),
            ModalState::Closed => None,
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ModalState> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn lock_player(&self) -> MutexGuard<'_, Option<VideoPlayerController>> {
        self.player
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
