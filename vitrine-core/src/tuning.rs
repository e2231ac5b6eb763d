use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timing knobs for the video player controller. None of these are
/// semantically load-bearing; tests inject short values, production
/// uses the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Pause between clearing the embed surface and loading the new
    /// source, so the old embed document is actually gone.
    pub settle_delay: Duration,
    /// Pause after the new source is set before the first bind attempt,
    /// giving the embed document time to load.
    pub arm_delay: Duration,
    /// Spacing between bind attempts while the platform is unavailable.
    pub init_retry_delay: Duration,
    /// Bind attempt budget; exhaustion degrades silently to a static
    /// embed with no custom controls.
    pub max_init_attempts: u8,
    /// Progress refresh cadence while playing.
    pub poll_interval: Duration,
    /// Delay before the surface source is cleared during teardown.
    pub clear_delay: Duration,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(100),
            arm_delay: Duration::from_millis(100),
            init_retry_delay: Duration::from_millis(500),
            max_init_attempts: 5,
            poll_interval: Duration::from_millis(100),
            clear_delay: Duration::from_millis(50),
        }
    }
}

/// Refresh schedule applied after content is injected into the page.
/// Measurements keep settling for a while, so the refresh repeats at
/// each offset of the ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeTuning {
    /// Offsets from the notification at which a refresh runs.
    pub steps: Vec<Duration>,
}

impl Default for ResizeTuning {
    fn default() -> Self {
        Self {
            steps: vec![
                Duration::from_millis(500),
                Duration::from_millis(1000),
                Duration::from_millis(1500),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_a_bounded_attempt_budget() {
        let tuning = PlayerTuning::default();
        assert!(tuning.max_init_attempts >= 2);
        assert!(tuning.init_retry_delay > Duration::ZERO);
    }

    #[test]
    fn tuning_round_trips_through_serde() {
        let tuning = PlayerTuning::default();
        let json = serde_json::to_string(&tuning).unwrap();
        let back: PlayerTuning = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tuning);
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let tuning: PlayerTuning =
            serde_json::from_str(r#"{ "max_init_attempts": 2 }"#).unwrap();
        assert_eq!(tuning.max_init_attempts, 2);
        assert_eq!(tuning.poll_interval, PlayerTuning::default().poll_interval);
    }

    #[test]
    fn resize_ladder_offsets_ascend() {
        let tuning = ResizeTuning::default();
        assert!(!tuning.steps.is_empty());
        assert!(tuning.steps.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
