//! Embedded video player: URL derivation, session state, and the
//! lifecycle controller.

pub mod controller;
pub mod embed;
pub mod format;
pub mod session;

pub use controller::VideoPlayerController;
pub use embed::{EMBED_HOST, derive_embed_url, extract_video_id};
pub use format::{RESET_TIME_LABEL, format_time, progress_label, progress_percent};
pub use session::InitPhase;
