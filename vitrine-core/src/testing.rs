//! In-memory stand-ins for the presentation ports, used by tests and
//! offline harness code. Playback stubs record every command they
//! receive and emit the events a real embed would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{EmbedError, PlayerApiError};
use crate::ports::{
    EmbedPlatform, EmbedSurface, MotionRefresher, OverlaySurface,
    PlaybackEvent, PlayerHandle, PlayerUi, ScrollEngine, ScrollToOptions,
    TransportLabel,
};

/// One playback command observed by a [`StubPlayer`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum HandleCommand {
    Play,
    Pause,
    SetTime(f64),
    SetVolume(f64),
    Ready,
}

#[derive(Debug)]
struct StubPlayerState {
    paused: bool,
    position: f64,
    duration: f64,
    volume: f64,
    reject_play: bool,
    fail_ready: bool,
    commands: Vec<HandleCommand>,
}

impl Default for StubPlayerState {
    fn default() -> Self {
        Self {
            paused: true,
            position: 0.0,
            duration: 0.0,
            volume: 0.0,
            reject_play: false,
            fail_ready: false,
            commands: Vec::new(),
        }
    }
}

/// Scripted player handle. Commands mutate in-memory playback state,
/// and successful play/pause commands emit the matching event, the way
/// a live embed confirms state changes.
#[derive(Debug)]
pub struct StubPlayer {
    state: RwLock<StubPlayerState>,
    events: broadcast::Sender<PlaybackEvent>,
}

impl Default for StubPlayer {
    fn default() -> Self {
        let (events, _) = broadcast::channel(16);
        Self {
            state: RwLock::new(StubPlayerState::default()),
            events,
        }
    }
}

impl StubPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_duration(&self, seconds: f64) {
        if let Ok(mut guard) = self.state.write() {
            guard.duration = seconds;
        }
    }

    pub fn set_position(&self, seconds: f64) {
        if let Ok(mut guard) = self.state.write() {
            guard.position = seconds;
        }
    }

    /// Make every `play` command fail, the way an autoplay policy does.
    pub fn reject_play(&self) {
        if let Ok(mut guard) = self.state.write() {
            guard.reject_play = true;
        }
    }

    pub fn fail_ready(&self) {
        if let Ok(mut guard) = self.state.write() {
            guard.fail_ready = true;
        }
    }

    /// Emit a playback event without a command, e.g. `Ended` when the
    /// video runs out on its own.
    pub fn emit(&self, event: PlaybackEvent) {
        let _ = self.events.send(event);
    }

    pub fn commands(&self) -> Vec<HandleCommand> {
        self.state.read().expect("lock poisoned").commands.clone()
    }

    pub fn is_paused(&self) -> bool {
        self.state.read().expect("lock poisoned").paused
    }

    pub fn position(&self) -> f64 {
        self.state.read().expect("lock poisoned").position
    }

    pub fn volume(&self) -> f64 {
        self.state.read().expect("lock poisoned").volume
    }

    fn record(&self, command: HandleCommand) {
        if let Ok(mut guard) = self.state.write() {
            guard.commands.push(command);
        }
    }
}

#[async_trait]
impl PlayerHandle for StubPlayer {
    async fn play(&self) -> Result<(), PlayerApiError> {
        self.record(HandleCommand::Play);
        {
            let mut guard = self.state.write().expect("lock poisoned");
            if guard.reject_play {
                return Err(PlayerApiError::Rejected(
                    "autoplay blocked".to_string(),
                ));
            }
            guard.paused = false;
        }
        let _ = self.events.send(PlaybackEvent::Play);
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlayerApiError> {
        self.record(HandleCommand::Pause);
        if let Ok(mut guard) = self.state.write() {
            guard.paused = true;
        }
        let _ = self.events.send(PlaybackEvent::Pause);
        Ok(())
    }

    async fn paused(&self) -> Result<bool, PlayerApiError> {
        Ok(self.state.read().expect("lock poisoned").paused)
    }

    async fn current_time(&self) -> Result<f64, PlayerApiError> {
        Ok(self.state.read().expect("lock poisoned").position)
    }

    async fn duration(&self) -> Result<f64, PlayerApiError> {
        Ok(self.state.read().expect("lock poisoned").duration)
    }

    async fn set_current_time(
        &self,
        seconds: f64,
    ) -> Result<(), PlayerApiError> {
        self.record(HandleCommand::SetTime(seconds));
        if let Ok(mut guard) = self.state.write() {
            guard.position = seconds;
        }
        Ok(())
    }

    async fn set_volume(&self, volume: f64) -> Result<(), PlayerApiError> {
        self.record(HandleCommand::SetVolume(volume));
        if let Ok(mut guard) = self.state.write() {
            guard.volume = volume;
        }
        Ok(())
    }

    async fn ready(&self) -> Result<(), PlayerApiError> {
        self.record(HandleCommand::Ready);
        if self.state.read().expect("lock poisoned").fail_ready {
            return Err(PlayerApiError::Detached);
        }
        Ok(())
    }

    fn events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.events.subscribe()
    }
}

#[derive(Debug, Default)]
struct ScriptedPlatformState {
    api_ready: bool,
    reject_bind: bool,
    autoplay_blocked: bool,
    default_duration: f64,
    bound: Vec<Arc<StubPlayer>>,
    ready_checks: usize,
}

/// Scripted embed platform. Every successful bind mints a fresh
/// [`StubPlayer`] and keeps it reachable for assertions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlatform {
    inner: Arc<RwLock<ScriptedPlatformState>>,
}

impl ScriptedPlatform {
    /// Platform whose API is already loaded.
    pub fn ready() -> Self {
        let platform = Self::default();
        platform.set_api_ready(true);
        platform
    }

    /// Platform whose API has not loaded yet.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn set_api_ready(&self, ready: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.api_ready = ready;
        }
    }

    pub fn reject_binds(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.reject_bind = true;
        }
    }

    /// Duration stamped onto every handle this platform mints.
    pub fn set_default_duration(&self, seconds: f64) {
        if let Ok(mut guard) = self.inner.write() {
            guard.default_duration = seconds;
        }
    }

    /// Make every minted handle reject `play`, the way a browser
    /// autoplay policy does.
    pub fn block_autoplay(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.autoplay_blocked = true;
        }
    }

    pub fn bound_players(&self) -> Vec<Arc<StubPlayer>> {
        self.inner.read().expect("lock poisoned").bound.clone()
    }

    pub fn bind_count(&self) -> usize {
        self.inner.read().expect("lock poisoned").bound.len()
    }

    pub fn ready_checks(&self) -> usize {
        self.inner.read().expect("lock poisoned").ready_checks
    }
}

impl EmbedPlatform for ScriptedPlatform {
    fn api_ready(&self) -> bool {
        let mut guard = self.inner.write().expect("lock poisoned");
        guard.ready_checks += 1;
        guard.api_ready
    }

    fn bind(
        &self,
        _surface: &dyn EmbedSurface,
    ) -> Result<Arc<dyn PlayerHandle>, EmbedError> {
        let mut guard = self.inner.write().expect("lock poisoned");
        if guard.reject_bind {
            return Err(EmbedError::Rejected(
                "scripted bind failure".to_string(),
            ));
        }
        let player = Arc::new(StubPlayer::new());
        player.set_duration(guard.default_duration);
        if guard.autoplay_blocked {
            player.reject_play();
        }
        guard.bound.push(player.clone());
        Ok(player)
    }
}

#[derive(Debug, Default)]
struct StubSurfaceState {
    source: Option<String>,
    history: Vec<Option<String>>,
}

/// Embed surface backed by a plain string slot, with a history of
/// every source write.
#[derive(Debug, Clone, Default)]
pub struct StubSurface {
    inner: Arc<RwLock<StubSurfaceState>>,
}

impl StubSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every value the source attribute has taken, in write order.
    pub fn history(&self) -> Vec<Option<String>> {
        self.inner.read().expect("lock poisoned").history.clone()
    }
}

impl EmbedSurface for StubSurface {
    fn set_source(&self, url: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.source = Some(url.to_string());
            guard.history.push(Some(url.to_string()));
        }
    }

    fn clear_source(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.source = None;
            guard.history.push(None);
        }
    }

    fn source(&self) -> Option<String> {
        self.inner.read().expect("lock poisoned").source.clone()
    }
}

#[derive(Debug)]
struct RecordingUiState {
    playing: bool,
    label: TransportLabel,
    percent: f64,
    time_label: String,
    label_history: Vec<TransportLabel>,
    time_history: Vec<String>,
}

impl Default for RecordingUiState {
    fn default() -> Self {
        Self {
            playing: false,
            label: TransportLabel::Play,
            percent: 0.0,
            time_label: String::new(),
            label_history: Vec::new(),
            time_history: Vec::new(),
        }
    }
}

/// Playback indicator surface that keeps the latest value of every
/// indicator plus label/time histories.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    inner: Arc<RwLock<RecordingUiState>>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_playing(&self) -> bool {
        self.inner.read().expect("lock poisoned").playing
    }

    pub fn transport_label(&self) -> TransportLabel {
        self.inner.read().expect("lock poisoned").label
    }

    pub fn progress_percent(&self) -> f64 {
        self.inner.read().expect("lock poisoned").percent
    }

    pub fn time_label(&self) -> String {
        self.inner.read().expect("lock poisoned").time_label.clone()
    }

    pub fn label_history(&self) -> Vec<TransportLabel> {
        self.inner
            .read()
            .expect("lock poisoned")
            .label_history
            .clone()
    }

    pub fn time_history(&self) -> Vec<String> {
        self.inner
            .read()
            .expect("lock poisoned")
            .time_history
            .clone()
    }
}

impl PlayerUi for RecordingUi {
    fn set_transport_label(&self, label: TransportLabel) {
        if let Ok(mut guard) = self.inner.write() {
            guard.label = label;
            guard.label_history.push(label);
        }
    }

    fn set_progress_percent(&self, percent: f64) {
        if let Ok(mut guard) = self.inner.write() {
            guard.percent = percent;
        }
    }

    fn set_time_label(&self, text: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.time_label = text.to_string();
            guard.time_history.push(text.to_string());
        }
    }

    fn set_playing(&self, playing: bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.playing = playing;
        }
    }
}

#[derive(Debug, Default)]
struct RecordingScrollState {
    log: Vec<String>,
}

/// Scroll engine that records calls in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingScroll {
    inner: Arc<RwLock<RecordingScrollState>>,
}

impl RecordingScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self) -> Vec<String> {
        self.inner.read().expect("lock poisoned").log.clone()
    }

    pub fn stop_count(&self) -> usize {
        self.count("stop")
    }

    pub fn start_count(&self) -> usize {
        self.count("start")
    }

    fn count(&self, call: &str) -> usize {
        self.inner
            .read()
            .expect("lock poisoned")
            .log
            .iter()
            .filter(|entry| entry.as_str() == call)
            .count()
    }

    fn record(&self, entry: String) {
        if let Ok(mut guard) = self.inner.write() {
            guard.log.push(entry);
        }
    }
}

impl ScrollEngine for RecordingScroll {
    fn stop(&self) {
        self.record("stop".to_string());
    }

    fn start(&self) {
        self.record("start".to_string());
    }

    fn resize(&self) {
        self.record("resize".to_string());
    }

    fn scroll_to(&self, target: &str, _options: ScrollToOptions) {
        self.record(format!("scroll_to:{target}"));
    }
}

#[derive(Debug, Default)]
struct RecordingOverlayState {
    visible: bool,
    captions: Vec<(String, String)>,
    slides: Vec<Option<usize>>,
}

/// Overlay surface that tracks visibility and captions.
#[derive(Debug, Clone, Default)]
pub struct RecordingOverlay {
    inner: Arc<RwLock<RecordingOverlayState>>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.inner.read().expect("lock poisoned").visible
    }

    pub fn captions(&self) -> Vec<(String, String)> {
        self.inner.read().expect("lock poisoned").captions.clone()
    }

    pub fn slides(&self) -> Vec<Option<usize>> {
        self.inner.read().expect("lock poisoned").slides.clone()
    }
}

impl OverlaySurface for RecordingOverlay {
    fn show(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.visible = true;
        }
    }

    fn hide(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.visible = false;
        }
    }

    fn set_caption(&self, title: &str, subtitle: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.captions.push((title.to_string(), subtitle.to_string()));
        }
    }

    fn set_active_slide(&self, index: Option<usize>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.slides.push(index);
        }
    }
}

/// Motion layer that counts refreshes.
#[derive(Debug, Clone, Default)]
pub struct RecordingRefresher {
    refreshes: Arc<AtomicUsize>,
}

impl RecordingRefresher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }
}

impl MotionRefresher for RecordingRefresher {
    fn refresh(&self) {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
    }
}
