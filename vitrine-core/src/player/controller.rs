//! Lifecycle controller for the embedded video player.
//!
//! # Invariants
//!
//! - At most one live handle per controller. A new [`load_video`] fully
//!   tears down the previous session (handle dropped, poll and init
//!   tasks aborted, phase reset) before the new one counts as started.
//! - Event subscriptions attach only after handle construction
//!   succeeds, so no event is observed before its session exists.
//! - Every async continuation re-checks the session generation under
//!   the state lock before touching state or indicators; completions
//!   from a superseded session are discarded.
//!
//! # Failure modes
//!
//! Platform rejections are consumed where they occur and logged at
//! most. Initialization retries on a fixed budget and gives up
//! silently; the page keeps working with a chrome-less static embed.
//!
//! [`load_video`]: VideoPlayerController::load_video

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace, warn};

use crate::player::embed::{EMBED_HOST, derive_embed_url};
use crate::player::format::{
    RESET_TIME_LABEL, progress_label, progress_percent,
};
use crate::player::session::{InitPhase, PlayerSession};
use crate::ports::{
    EmbedPlatform, EmbedSurface, PlaybackEvent, PlayerHandle, PlayerUi,
    TransportLabel,
};
use crate::tuning::PlayerTuning;

/// Outcome of one bind attempt against the embed platform.
enum BindOutcome {
    Bound(Arc<dyn PlayerHandle>),
    NotReady,
    Stale,
}

/// Owns the lifecycle of a single embedded player bound to one embed
/// surface: source derivation, handle construction and teardown, event
/// wiring, progress polling, and seek/toggle commands.
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct VideoPlayerController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    platform: Arc<dyn EmbedPlatform>,
    surface: Arc<dyn EmbedSurface>,
    ui: Arc<dyn PlayerUi>,
    tuning: PlayerTuning,
    session: Mutex<PlayerSession>,
}

impl std::fmt::Debug for VideoPlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoPlayerController")
            .field("tuning", &self.inner.tuning)
            .field("session", &self.lock_session())
            .finish()
    }
}

impl VideoPlayerController {
    pub fn new(
        platform: Arc<dyn EmbedPlatform>,
        surface: Arc<dyn EmbedSurface>,
        ui: Arc<dyn PlayerUi>,
        tuning: PlayerTuning,
    ) -> Self {
        Self {
            inner: Arc::new(ControllerInner {
                platform,
                surface,
                ui,
                tuning,
                session: Mutex::new(PlayerSession::new()),
            }),
        }
    }

    /// Load a new video. Returns `false` with no side effect when the
    /// source URL carries no extractable id. Otherwise tears down any
    /// previous session, resets the indicators, and arms
    /// initialization against the derived embed URL.
    pub fn load_video(&self, source_url: &str) -> bool {
        let Some(embed_url) = derive_embed_url(source_url) else {
            debug!("load ignored, no video id in source url");
            return false;
        };

        let generation = {
            let mut session = self.lock_session();
            session.invalidate();
            session.embed_url = Some(embed_url.clone());
            session.generation
        };
        debug!(generation, "loading video {}", embed_url);

        self.reset_indicators();
        self.inner.surface.clear_source();

        let this = self.clone();
        let arm = tokio::spawn(async move {
            tokio::time::sleep(this.inner.tuning.settle_delay).await;
            if !this.still_current(generation) {
                return;
            }
            this.inner.surface.set_source(&embed_url);
            tokio::time::sleep(this.inner.tuning.arm_delay).await;
            this.run_init_attempts(generation).await;
        });
        self.adopt_pending(generation, arm);
        true
    }

    /// Tear down the current session. Idempotent and the single
    /// cancellation entry point: aborts the poll and init tasks,
    /// detaches event subscriptions, best-effort pauses the old handle,
    /// clears the surface after a short delay, and resets indicators.
    pub fn stop(&self) {
        let (old_handle, generation) = {
            let mut session = self.lock_session();
            let handle = session.invalidate();
            (handle, session.generation)
        };

        if let Some(handle) = old_handle {
            debug!("stopping active player session");
            // Already-issued commands are not cancelled; this pause is
            // fire-and-forget against a handle the session no longer owns.
            tokio::spawn(async move {
                if let Err(err) = handle.pause().await {
                    debug!("pause during teardown rejected: {err}");
                }
            });
        }

        self.reset_indicators();

        let this = self.clone();
        let clear = tokio::spawn(async move {
            tokio::time::sleep(this.inner.tuning.clear_delay).await;
            // Skipped when a new load has claimed the surface meanwhile.
            if this.still_current(generation) {
                this.inner.surface.clear_source();
            }
        });
        self.adopt_pending(generation, clear);
    }

    /// Begin the bind sequence for the current session. Re-entrant:
    /// concurrent invocations collapse into the one in-flight attempt
    /// sequence, and a live handle makes this a no-op.
    pub fn init(&self) {
        let generation = {
            let session = self.lock_session();
            if session.handle.is_some() || session.phase.is_attempting() {
                trace!("init ignored, session already {:?}", session.phase);
                return;
            }
            session.generation
        };
        let this = self.clone();
        let task = tokio::spawn(async move {
            this.run_init_attempts(generation).await;
        });
        self.adopt_pending(generation, task);
    }

    /// Query the paused state and issue the complementary command.
    /// No-op without a live handle.
    pub async fn toggle_play_pause(&self) {
        let handle = self.lock_session().handle.clone();
        let Some(handle) = handle else {
            debug!("toggle ignored, no live player");
            return;
        };
        match handle.paused().await {
            Ok(true) => {
                if let Err(err) = handle.set_volume(1.0).await {
                    debug!("volume restore rejected: {err}");
                }
                if let Err(err) = handle.play().await {
                    warn!("play rejected: {err}");
                }
            }
            Ok(false) => {
                if let Err(err) = handle.pause().await {
                    debug!("pause rejected: {err}");
                }
            }
            Err(err) => debug!("paused query failed: {err}"),
        }
    }

    /// Seek to a normalized position within the video, resolving the
    /// duration from cache or the handle. No-op without a live handle.
    pub async fn seek_to_fraction(&self, fraction: f64) {
        let (handle, cached, generation) = {
            let session = self.lock_session();
            (
                session.handle.clone(),
                session.duration_secs,
                session.generation,
            )
        };
        let Some(handle) = handle else {
            debug!("seek ignored, no live player");
            return;
        };
        let fraction = if fraction.is_finite() {
            fraction.clamp(0.0, 1.0)
        } else {
            return;
        };

        let duration = if cached > 0.0 {
            cached
        } else {
            match handle.duration().await {
                Ok(duration) => {
                    self.cache_duration(generation, duration);
                    duration
                }
                Err(err) => {
                    debug!("seek abandoned, duration unavailable: {err}");
                    return;
                }
            }
        };
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }

        let target = fraction * duration;
        if let Err(err) = handle.set_current_time(target).await {
            debug!("seek to {target:.1}s rejected: {err}");
        }
    }

    /// Where the initialization machine currently stands.
    pub fn init_phase(&self) -> InitPhase {
        self.lock_session().phase
    }

    /// Whether a handle is currently bound.
    pub fn is_live(&self) -> bool {
        self.lock_session().handle.is_some()
    }

    /// The duration cached for the current session, 0 until known.
    pub fn cached_duration(&self) -> f64 {
        self.lock_session().duration_secs
    }

    // ---- session plumbing ----

    fn lock_session(&self) -> MutexGuard<'_, PlayerSession> {
        self.inner
            .session
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn still_current(&self, generation: u64) -> bool {
        self.lock_session().generation == generation
    }

    /// Adopt a spawned task into the session that spawned it, or abort
    /// it when that session has already been superseded.
    fn adopt_pending(&self, generation: u64, task: JoinHandle<()>) {
        let mut session = self.lock_session();
        if session.generation == generation {
            session.pending.push(task);
        } else {
            task.abort();
        }
    }

    fn reset_indicators(&self) {
        self.inner.ui.set_playing(false);
        self.inner.ui.set_transport_label(TransportLabel::Play);
        self.inner.ui.set_progress_percent(0.0);
        self.inner.ui.set_time_label(RESET_TIME_LABEL);
    }

    fn cache_duration(&self, generation: u64, duration: f64) {
        if !duration.is_finite() || duration <= 0.0 {
            return;
        }
        let mut session = self.lock_session();
        if session.generation == generation {
            session.duration_secs = duration;
        }
    }

    // ---- initialization ----

    /// The bounded bind loop: attempt, reschedule on a fixed delay
    /// while the budget lasts, give up silently when it runs out.
    async fn run_init_attempts(&self, generation: u64) {
        {
            let mut session = self.lock_session();
            if session.generation != generation {
                return;
            }
            if session.handle.is_some() || session.phase.is_attempting() {
                return;
            }
            session.phase = InitPhase::Attempting(1);
        }

        let max_attempts = self.inner.tuning.max_init_attempts;
        loop {
            match self.try_bind(generation) {
                BindOutcome::Bound(handle) => {
                    self.finish_init(generation, handle).await;
                    return;
                }
                BindOutcome::Stale => return,
                BindOutcome::NotReady => {}
            }

            let retry = {
                let mut session = self.lock_session();
                if session.generation != generation {
                    return;
                }
                match session.phase {
                    InitPhase::Attempting(n) if n < max_attempts => {
                        session.phase = InitPhase::Attempting(n + 1);
                        true
                    }
                    InitPhase::Attempting(_) => {
                        session.phase = InitPhase::GaveUp;
                        false
                    }
                    _ => false,
                }
            };
            if !retry {
                debug!(
                    "player init gave up after {max_attempts} attempts, \
                     leaving the embed uncontrolled"
                );
                return;
            }
            tokio::time::sleep(self.inner.tuning.init_retry_delay).await;
        }
    }

    /// One bind attempt. Preconditions: the platform API has loaded and
    /// the surface still shows the expected embed host.
    fn try_bind(&self, generation: u64) -> BindOutcome {
        if !self.still_current(generation) {
            return BindOutcome::Stale;
        }
        if !self.inner.platform.api_ready() {
            trace!("player api not yet available");
            return BindOutcome::NotReady;
        }
        let surface_ok = self
            .inner
            .surface
            .source()
            .map(|src| src.contains(EMBED_HOST))
            .unwrap_or(false);
        if !surface_ok {
            trace!("embed surface not pointing at {EMBED_HOST}");
            return BindOutcome::NotReady;
        }
        match self.inner.platform.bind(self.inner.surface.as_ref()) {
            Ok(handle) => BindOutcome::Bound(handle),
            Err(err) => {
                warn!("embed bind rejected: {err}");
                BindOutcome::NotReady
            }
        }
    }

    /// Publish a freshly bound handle, wire its events, then run the
    /// readiness sequence: fetch the duration once, restore volume,
    /// request playback. An autoplay rejection leaves the paused
    /// indicators in place.
    async fn finish_init(&self, generation: u64, handle: Arc<dyn PlayerHandle>) {
        {
            let mut session = self.lock_session();
            if session.generation != generation {
                // A newer load won the race; this handle never had
                // events attached, dropping it is the whole teardown.
                return;
            }
            session.handle = Some(handle.clone());
            session.phase = InitPhase::Ready;

            let events = handle.events();
            let this = self.clone();
            session.event_task = Some(tokio::spawn(async move {
                this.pump_events(generation, events).await;
            }));
        }
        debug!(generation, "player handle bound");

        if let Err(err) = handle.ready().await {
            warn!("player readiness failed: {err}");
            return;
        }
        if !self.still_current(generation) {
            return;
        }
        match handle.duration().await {
            Ok(duration) => self.cache_duration(generation, duration),
            Err(err) => trace!("duration not yet known: {err}"),
        }
        if let Err(err) = handle.set_volume(1.0).await {
            debug!("volume set rejected: {err}");
        }
        if !self.still_current(generation) {
            return;
        }
        if let Err(err) = handle.play().await {
            warn!("autoplay declined, leaving player paused: {err}");
        }
    }

    // ---- playback events ----

    async fn pump_events(
        &self,
        generation: u64,
        mut events: broadcast::Receiver<PlaybackEvent>,
    ) {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if !self.still_current(generation) {
                        return;
                    }
                    trace!(?event, "playback event");
                    match event {
                        PlaybackEvent::Play => self.on_play(generation),
                        PlaybackEvent::Pause => self.on_pause(generation).await,
                        PlaybackEvent::Ended => self.on_ended(generation).await,
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    trace!("playback event feed lagged by {skipped}");
                }
                Err(broadcast::error::RecvError::Closed) => return,
            }
        }
    }

    fn on_play(&self, generation: u64) {
        self.inner.ui.set_playing(true);
        self.inner.ui.set_transport_label(TransportLabel::Pause);
        self.start_progress_poll(generation);
    }

    async fn on_pause(&self, generation: u64) {
        self.inner.ui.set_playing(false);
        self.inner.ui.set_transport_label(TransportLabel::Play);
        self.stop_progress_poll(generation);
        // One final refresh so the indicators land on the exact pause
        // position instead of the last tick.
        self.refresh_progress(generation).await;
    }

    async fn on_ended(&self, generation: u64) {
        let handle = self.lock_session().handle.clone();
        let Some(handle) = handle else {
            return;
        };
        if let Err(err) = handle.set_current_time(0.0).await {
            debug!("rewind after end rejected: {err}");
        }
        if let Err(err) = handle.pause().await {
            debug!("pause after end rejected: {err}");
        }
        self.inner.ui.set_playing(false);
        self.inner.ui.set_transport_label(TransportLabel::Play);
        self.stop_progress_poll(generation);
    }

    // ---- progress polling ----

    fn start_progress_poll(&self, generation: u64) {
        let mut session = self.lock_session();
        if session.generation != generation {
            return;
        }
        if let Some(task) = session.poll_task.take() {
            task.abort();
        }
        let this = self.clone();
        session.poll_task = Some(tokio::spawn(async move {
            let mut ticker =
                tokio::time::interval(this.inner.tuning.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !this.still_current(generation) {
                    return;
                }
                this.refresh_progress(generation).await;
            }
        }));
    }

    fn stop_progress_poll(&self, generation: u64) {
        let mut session = self.lock_session();
        if session.generation != generation {
            return;
        }
        if let Some(task) = session.poll_task.take() {
            task.abort();
        }
    }

    /// Fetch current time and duration concurrently and update the
    /// indicators. Any failure is swallowed; the poll loop survives.
    async fn refresh_progress(&self, generation: u64) {
        let (handle, cached) = {
            let session = self.lock_session();
            if session.generation != generation {
                return;
            }
            (session.handle.clone(), session.duration_secs)
        };
        let Some(handle) = handle else {
            return;
        };

        let (current, duration) = tokio::join!(handle.current_time(), async {
            if cached > 0.0 {
                Ok(cached)
            } else {
                handle.duration().await
            }
        });

        match (current, duration) {
            (Ok(current), Ok(duration)) => {
                if cached <= 0.0 {
                    self.cache_duration(generation, duration);
                }
                if !self.still_current(generation) {
                    return;
                }
                self.inner
                    .ui
                    .set_progress_percent(progress_percent(current, duration));
                self.inner
                    .ui
                    .set_time_label(&progress_label(current, duration));
            }
            _ => trace!("progress refresh skipped, player query failed"),
        }
    }
}
