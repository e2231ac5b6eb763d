//! Time and progress formatting for the playback indicators.

/// Time label shown when no playback position is known.
pub const RESET_TIME_LABEL: &str = "0:00 / 0:00";

/// Format seconds as `M:SS`. Non-finite and negative inputs collapse
/// to zero, matching the indicator's reset state.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let minutes = total / 60;
    let secs = total % 60;
    format!("{minutes}:{secs:02}")
}

/// The `current / total` time label.
pub fn progress_label(current: f64, duration: f64) -> String {
    format!("{} / {}", format_time(current), format_time(duration))
}

/// Progress through the video as a percentage, guarded against unknown
/// or zero durations.
pub fn progress_percent(current: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 {
        return 0.0;
    }
    (current / duration * 100.0).clamp(0.0, 100.0)
}
