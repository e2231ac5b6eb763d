//! # Vitrine Core
//!
//! Behavior engine for the vitrine marketing site: video playback
//! sessions, the work-item modal, navigation, and page readiness.
//!
//! ## Overview
//!
//! `vitrine-core` owns every stateful behavior of the page while the
//! presentation layer stays a thin shell:
//!
//! - **Video Playback**: Lifecycle of the embedded third-party player,
//!   from source-URL derivation through bounded-retry initialization to
//!   teardown, with playback events wired into indicator state
//! - **Modal Sessions**: Overlay visibility paired with the page scroll
//!   lock, one session at a time
//! - **Navigation**: Anchor scrolling with a post-click suppression
//!   window, scroll-position tracking, and the mobile menu machine
//! - **Section Themes**: Viewport dominance resolution and grouped
//!   body-theme changes
//! - **Readiness**: Deadline-bounded gates over font and image loading
//! - **Layout Refresh**: Staggered scroll-engine and animation-trigger
//!   refresh after content injection
//!
//! Presentation surfaces and platform facilities are consumed through
//! the trait ports in [`ports`]; the engine never touches them
//! directly, which is what keeps every behavior testable with the
//! in-memory doubles in [`testing`].
//!
//! ## Architecture
//!
//! - [`player`]: embed URL derivation, the player session machine, and
//!   [`player::VideoPlayerController`]
//! - [`modal`]: the modal session controller
//! - [`nav`]: anchor navigation, menu lock context, menu phases
//! - [`sections`]: section dominance and the theme director
//! - [`ready`]: asset readiness gates
//! - [`resize`]: the staggered layout-refresh coordinator
//! - [`ports`]: trait contracts for everything the engine drives
//! - [`tuning`]: timing knobs with production defaults
//!
//! All timers and spawned session tasks run on an ambient tokio
//! runtime; controllers are cheap to clone and share state internally.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vitrine_core::player::VideoPlayerController;
//! use vitrine_core::testing::{RecordingUi, ScriptedPlatform, StubSurface};
//! use vitrine_core::tuning::PlayerTuning;
//!
//! #[tokio::main]
//! async fn main() {
//!     let player = VideoPlayerController::new(
//!         Arc::new(ScriptedPlatform::ready()),
//!         Arc::new(StubSurface::new()),
//!         Arc::new(RecordingUi::new()),
//!         PlayerTuning::default(),
//!     );
//!     player.load_video("https://vimeo.com/123456789");
//! }
//! ```

#![allow(missing_docs)]

/// Error types for player and embed failures
pub mod error;

/// Modal session controller
pub mod modal;

/// Anchor navigation, menu lock, and the mobile menu machine
pub mod nav;

/// Embedded video player lifecycle
pub mod player;

/// Trait contracts for presentation surfaces and platform facilities
pub mod ports;

/// Asset readiness gates for the initial reveal
pub mod ready;

/// Staggered layout refresh after content injection
pub mod resize;

/// Section dominance and the body theme director
pub mod sections;

/// In-memory port implementations for tests and offline harnesses
pub mod testing;

/// Timing knobs with production defaults
pub mod tuning;

// Commonly used types, re-exported at the crate root.
pub use error::{EmbedError, PlayerApiError};
pub use modal::{ModalController, ModalState};
pub use nav::{MenuLockContext, MenuPhase, NavController};
pub use player::{InitPhase, VideoPlayerController, derive_embed_url, format_time};
pub use ports::{PlaybackEvent, TransportLabel};
pub use ready::{GateHandle, GateOutcome, ReadinessGate, wait_for_assets};
pub use resize::ResizeCoordinator;
pub use sections::{Theme, ThemeDirector, most_visible_section};
pub use tuning::{PlayerTuning, ResizeTuning};
