//! Startup readiness gate for the initial reveal.
//!
//! The page reveal waits for fonts and critical images, but never
//! forever: every gate carries a deadline, and a failed asset counts
//! as settled so one broken image cannot hold the page dark.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, warn};

/// How a wait on a readiness gate resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Every tracked asset settled before the deadline.
    Complete,
    /// The deadline fired first; the reveal proceeds regardless.
    TimedOut,
}

/// Counting side of a gate. Cloned into each asset's completion
/// callback; loads and failures both settle one slot.
#[derive(Debug, Clone)]
pub struct GateHandle {
    remaining: Arc<watch::Sender<usize>>,
}

impl GateHandle {
    pub fn mark_loaded(&self) {
        self.remaining.send_modify(|n| *n = n.saturating_sub(1));
    }

    pub fn mark_failed(&self) {
        warn!("asset failed to load, counting it as settled");
        self.remaining.send_modify(|n| *n = n.saturating_sub(1));
    }
}

/// Waiting side of a gate over a fixed number of assets.
#[derive(Debug)]
pub struct ReadinessGate {
    remaining: watch::Receiver<usize>,
}

impl ReadinessGate {
    /// Gate over `total` assets. A zero-asset gate is already complete.
    pub fn new(total: usize) -> (Self, GateHandle) {
        let (tx, rx) = watch::channel(total);
        (
            Self { remaining: rx },
            GateHandle {
                remaining: Arc::new(tx),
            },
        )
    }

    /// Wait until every asset settles or the deadline fires. Dropping
    /// every handle with slots outstanding also resolves the wait,
    /// since those assets can no longer settle.
    pub async fn wait(mut self, limit: Duration) -> GateOutcome {
        let settled = self.remaining.wait_for(|remaining| *remaining == 0);
        match tokio::time::timeout(limit, settled).await {
            Ok(Ok(_)) => GateOutcome::Complete,
            Ok(Err(_)) => {
                warn!("readiness handles dropped with assets outstanding");
                GateOutcome::TimedOut
            }
            Err(_) => {
                debug!("readiness deadline fired, revealing anyway");
                GateOutcome::TimedOut
            }
        }
    }
}

/// Wait for several gates under one shared deadline. Reports
/// [`GateOutcome::TimedOut`] when any gate failed to complete in time.
pub async fn wait_for_assets(
    gates: Vec<ReadinessGate>,
    limit: Duration,
) -> GateOutcome {
    let deadline = tokio::time::Instant::now() + limit;
    let mut outcome = GateOutcome::Complete;
    for gate in gates {
        let remaining =
            deadline.saturating_duration_since(tokio::time::Instant::now());
        if gate.wait(remaining).await == GateOutcome::TimedOut {
            outcome = GateOutcome::TimedOut;
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn completes_once_every_asset_settles() {
        let (gate, handle) = ReadinessGate::new(3);
        handle.mark_loaded();
        handle.mark_failed();
        handle.mark_loaded();
        assert_eq!(gate.wait(Duration::from_secs(5)).await, GateOutcome::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_asset_gate_is_already_complete() {
        let (gate, _handle) = ReadinessGate::new(0);
        assert_eq!(gate.wait(Duration::from_secs(5)).await, GateOutcome::Complete);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_marks_time_out_at_the_deadline() {
        let (gate, handle) = ReadinessGate::new(2);
        handle.mark_loaded();
        assert_eq!(gate.wait(Duration::from_secs(5)).await, GateOutcome::TimedOut);
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_handles_resolve_the_wait_early() {
        let (gate, handle) = ReadinessGate::new(2);
        drop(handle);
        assert_eq!(
            gate.wait(Duration::from_secs(3600)).await,
            GateOutcome::TimedOut
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shared_deadline_spans_every_gate() {
        let (fonts, font_handle) = ReadinessGate::new(1);
        let (images, image_handle) = ReadinessGate::new(2);
        font_handle.mark_loaded();
        image_handle.mark_loaded();
        image_handle.mark_loaded();
        assert_eq!(
            wait_for_assets(vec![fonts, images], Duration::from_secs(5)).await,
            GateOutcome::Complete
        );

        let (fonts, font_handle) = ReadinessGate::new(1);
        let (images, _image_handle) = ReadinessGate::new(1);
        font_handle.mark_loaded();
        assert_eq!(
            wait_for_assets(vec![fonts, images], Duration::from_secs(5)).await,
            GateOutcome::TimedOut
        );
    }
}
