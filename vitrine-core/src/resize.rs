//! Staggered layout refresh after asynchronous content injection.
//!
//! Once fetched content lands in the page, the scroll engine's cached
//! dimensions and the scroll-driven animation triggers are stale. The
//! page keeps settling (images decode, fonts swap), so a single
//! immediate refresh is not enough; the coordinator replays the
//! refresh at each offset of a short ladder instead.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::trace;

use crate::ports::{MotionRefresher, ScrollEngine};
use crate::tuning::ResizeTuning;

/// Coalesces content-change notifications into one refresh ladder at a
/// time. Cheap to clone; clones share the schedule.
#[derive(Clone)]
pub struct ResizeCoordinator {
    scroll: Arc<dyn ScrollEngine>,
    motion: Arc<dyn MotionRefresher>,
    tuning: ResizeTuning,
    running: Arc<AtomicBool>,
}

impl std::fmt::Debug for ResizeCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResizeCoordinator")
            .field("tuning", &self.tuning)
            .field("running", &self.running.load(Ordering::Relaxed))
            .finish()
    }
}

impl ResizeCoordinator {
    pub fn new(
        scroll: Arc<dyn ScrollEngine>,
        motion: Arc<dyn MotionRefresher>,
        tuning: ResizeTuning,
    ) -> Self {
        Self {
            scroll,
            motion,
            tuning,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Note that page content changed. Starts the refresh ladder, or
    /// does nothing when one is already in flight.
    pub fn content_changed(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            trace!("refresh ladder already scheduled");
            return;
        }
        let this = self.clone();
        tokio::spawn(async move {
            let mut elapsed = Duration::ZERO;
            for offset in &this.tuning.steps {
                tokio::time::sleep(offset.saturating_sub(elapsed)).await;
                elapsed = *offset;
                trace!("layout refresh at {elapsed:?}");
                this.scroll.resize();
                this.motion.refresh();
            }
            this.running.store(false, Ordering::SeqCst);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct CountingScroll {
        resizes: AtomicUsize,
    }

    impl ScrollEngine for CountingScroll {
        fn stop(&self) {}
        fn start(&self) {}
        fn resize(&self) {
            self.resizes.fetch_add(1, Ordering::SeqCst);
        }
        fn scroll_to(&self, _target: &str, _options: crate::ports::ScrollToOptions) {}
    }

    #[derive(Default)]
    struct CountingMotion {
        refreshes: AtomicUsize,
    }

    impl MotionRefresher for CountingMotion {
        fn refresh(&self) {
            self.refreshes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn coordinator() -> (ResizeCoordinator, Arc<CountingScroll>, Arc<CountingMotion>) {
        let scroll = Arc::new(CountingScroll::default());
        let motion = Arc::new(CountingMotion::default());
        let coordinator = ResizeCoordinator::new(
            scroll.clone(),
            motion.clone(),
            ResizeTuning::default(),
        );
        (coordinator, scroll, motion)
    }

    async fn settle() {
        // Past the last ladder offset; paused time fast-forwards.
        tokio::time::sleep(Duration::from_secs(3)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn burst_runs_one_ladder() {
        let (coordinator, scroll, motion) = coordinator();
        coordinator.content_changed();
        coordinator.content_changed();
        coordinator.content_changed();
        settle().await;
        assert_eq!(scroll.resizes.load(Ordering::SeqCst), 3);
        assert_eq!(motion.refreshes.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn completed_ladder_allows_a_new_schedule() {
        let (coordinator, scroll, _motion) = coordinator();
        coordinator.content_changed();
        settle().await;
        coordinator.content_changed();
        settle().await;
        assert_eq!(scroll.resizes.load(Ordering::SeqCst), 6);
    }
}
