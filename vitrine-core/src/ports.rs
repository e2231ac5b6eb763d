//! Trait contracts for the presentation surfaces and platform
//! facilities the engine drives. Every port is injected as a shared
//! trait object; the engine owns none of their lifecycles.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::{EmbedError, PlayerApiError};

/// Playback notification emitted by a live player handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Ended,
}

/// Text shown on the transport (play/pause) control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportLabel {
    Play,
    Pause,
}

/// The opaque external-player object through which playback commands
/// are issued. Every command resolves asynchronously and may be
/// rejected by the platform; callers consume rejections locally.
#[async_trait]
pub trait PlayerHandle: Send + Sync {
    async fn play(&self) -> Result<(), PlayerApiError>;
    async fn pause(&self) -> Result<(), PlayerApiError>;
    async fn paused(&self) -> Result<bool, PlayerApiError>;
    async fn current_time(&self) -> Result<f64, PlayerApiError>;
    async fn duration(&self) -> Result<f64, PlayerApiError>;
    async fn set_current_time(&self, seconds: f64) -> Result<(), PlayerApiError>;
    async fn set_volume(&self, volume: f64) -> Result<(), PlayerApiError>;
    /// Resolves once the handle is ready to accept playback commands.
    async fn ready(&self) -> Result<(), PlayerApiError>;
    /// Playback event feed. Only events emitted after subscription are
    /// observed.
    fn events(&self) -> broadcast::Receiver<PlaybackEvent>;
}

/// The iframe hosting the third-party player. Its source attribute is
/// the only write channel to the embed.
pub trait EmbedSurface: Send + Sync {
    fn set_source(&self, url: &str);
    fn clear_source(&self);
    fn source(&self) -> Option<String>;
}

/// Entry point to the external player script: availability of the API
/// and construction of handles bound to an embed surface.
pub trait EmbedPlatform: Send + Sync {
    /// Whether the external player script has finished loading.
    fn api_ready(&self) -> bool;
    /// Bind a handle to the surface's currently loaded embed document.
    fn bind(
        &self,
        surface: &dyn EmbedSurface,
    ) -> Result<Arc<dyn PlayerHandle>, EmbedError>;
}

/// Playback indicators owned by the page: transport label, progress
/// bar, time text, and the playing marker on the modal chrome.
#[cfg_attr(test, mockall::automock)]
pub trait PlayerUi: Send + Sync {
    fn set_transport_label(&self, label: TransportLabel);
    /// Progress through the video, 0.0 to 100.0.
    fn set_progress_percent(&self, percent: f64);
    fn set_time_label(&self, text: &str);
    fn set_playing(&self, playing: bool);
}

/// The overlay that hosts the video player.
#[cfg_attr(test, mockall::automock)]
pub trait OverlaySurface: Send + Sync {
    fn show(&self);
    fn hide(&self);
    fn set_caption(&self, title: &str, subtitle: &str);
    /// Carousel slide the overlay should land on, when the trigger
    /// carries one.
    fn set_active_slide(&self, index: Option<usize>);
}

/// Options for a programmatic scroll.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollToOptions {
    /// Pixel offset applied to the target position.
    pub offset: f64,
}

/// The page's smooth-scroll engine. Shared process-wide; while a modal
/// session is open, only the modal controller may stop or start it.
#[cfg_attr(test, mockall::automock)]
pub trait ScrollEngine: Send + Sync {
    fn stop(&self);
    fn start(&self);
    /// Recompute internal dimensions after content changes.
    fn resize(&self);
    fn scroll_to(&self, target: &str, options: ScrollToOptions);
}

/// Scroll-driven animation layer that must recompute trigger positions
/// after layout changes.
#[cfg_attr(test, mockall::automock)]
pub trait MotionRefresher: Send + Sync {
    fn refresh(&self);
}
