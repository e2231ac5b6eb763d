//! Anchor navigation, scroll-position tracking, and the mobile menu.
//!
//! Clicking an anchor starts a programmatic scroll toward its section.
//! While that scroll animates, position tracking would briefly light up
//! every section passed on the way, so each click opens a suppression
//! window during which only the clicked target may become active. The
//! window is carried in an explicit [`MenuLockContext`] value.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, trace};
use vitrine_model::{Rect, SectionId};

use crate::ports::{ScrollEngine, ScrollToOptions};

/// How long section tracking stays pinned to a clicked anchor target.
pub const DEFAULT_LOCK_HOLD: Duration = Duration::from_millis(1600);

/// Post-click suppression window for scroll-position tracking.
#[derive(Debug, Clone)]
pub struct MenuLockContext {
    active_lock_id: Option<SectionId>,
    lock_until: Instant,
}

impl MenuLockContext {
    pub fn new(now: Instant) -> Self {
        Self {
            active_lock_id: None,
            lock_until: now,
        }
    }

    /// Pin tracking to `target` until `now + hold`.
    pub fn lock(&mut self, target: SectionId, hold: Duration, now: Instant) {
        self.active_lock_id = Some(target);
        self.lock_until = now + hold;
    }

    /// Whether `candidate` must be ignored: a lock is active, within
    /// its window, and aimed at a different section.
    pub fn suppresses(&self, candidate: &SectionId, now: Instant) -> bool {
        match &self.active_lock_id {
            Some(locked) => now < self.lock_until && candidate != locked,
            None => false,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.active_lock_id.is_some() && now >= self.lock_until
    }

    pub fn clear(&mut self) {
        self.active_lock_id = None;
    }
}

/// Open/close lifecycle of the mobile menu. Transitions animate, and a
/// toggle is only honored from a settled phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Section whose center sits nearest the viewport center.
pub fn resolve_active_section(
    viewport_height: f64,
    sections: &[(SectionId, Rect)],
) -> Option<SectionId> {
    let viewport_center = viewport_height / 2.0;
    sections
        .iter()
        .min_by(|(_, a), (_, b)| {
            let da = (a.center_y() - viewport_center).abs();
            let db = (b.center_y() - viewport_center).abs();
            da.total_cmp(&db)
        })
        .map(|(id, _)| id.clone())
}

/// Coordinates anchor clicks, the suppression window, menu phases, and
/// the active-section highlight.
pub struct NavController {
    scroll: Arc<dyn ScrollEngine>,
    lock: MenuLockContext,
    lock_hold: Duration,
    anchor_offset: f64,
    active: Option<SectionId>,
    menu: MenuPhase,
}

impl std::fmt::Debug for NavController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavController")
            .field("lock", &self.lock)
            .field("active", &self.active)
            .field("menu", &self.menu)
            .finish()
    }
}

impl NavController {
    pub fn new(scroll: Arc<dyn ScrollEngine>, now: Instant) -> Self {
        Self {
            scroll,
            lock: MenuLockContext::new(now),
            lock_hold: DEFAULT_LOCK_HOLD,
            anchor_offset: 0.0,
            active: None,
            menu: MenuPhase::Closed,
        }
    }

    pub fn with_lock_hold(mut self, hold: Duration) -> Self {
        self.lock_hold = hold;
        self
    }

    pub fn with_anchor_offset(mut self, offset: f64) -> Self {
        self.anchor_offset = offset;
        self
    }

    /// Handle a click on a section anchor: scroll there, pin tracking
    /// to the target for the hold window, and close an open menu.
    pub fn anchor_clicked(&mut self, target: SectionId, now: Instant) {
        debug!("navigating to section {target}");
        self.scroll.scroll_to(
            target.as_str(),
            ScrollToOptions {
                offset: self.anchor_offset,
            },
        );
        self.lock.lock(target.clone(), self.lock_hold, now);
        self.active = Some(target);
        if self.menu == MenuPhase::Open {
            self.menu = MenuPhase::Closing;
        }
    }

    /// Feed one scroll-position measurement. Returns the section that
    /// just became active, when the highlight changed.
    pub fn observe_scroll(
        &mut self,
        viewport_height: f64,
        sections: &[(SectionId, Rect)],
        now: Instant,
    ) -> Option<SectionId> {
        if self.lock.is_expired(now) {
            self.lock.clear();
        }
        let resolved = resolve_active_section(viewport_height, sections)?;
        if self.lock.suppresses(&resolved, now) {
            trace!("section {resolved} suppressed by navigation lock");
            return None;
        }
        if self.active.as_ref() == Some(&resolved) {
            return None;
        }
        self.active = Some(resolved.clone());
        Some(resolved)
    }

    /// Request a menu open or close. Ignored while a transition is
    /// still animating; returns the phase entered, if any.
    pub fn toggle_menu(&mut self) -> Option<MenuPhase> {
        let next = match self.menu {
            MenuPhase::Closed => MenuPhase::Opening,
            MenuPhase::Open => MenuPhase::Closing,
            MenuPhase::Opening | MenuPhase::Closing => {
                trace!("menu toggle ignored mid-transition");
                return None;
            }
        };
        self.menu = next;
        Some(next)
    }

    /// Settle the in-flight menu transition.
    pub fn menu_transition_finished(&mut self) {
        self.menu = match self.menu {
            MenuPhase::Opening => MenuPhase::Open,
            MenuPhase::Closing => MenuPhase::Closed,
            settled => settled,
        };
    }

    pub fn menu_phase(&self) -> MenuPhase {
        self.menu
    }

    pub fn active_section(&self) -> Option<&SectionId> {
        self.active.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::MockScrollEngine;

    fn section(id: &str) -> SectionId {
        SectionId::new(id).expect("valid id")
    }

    fn layout(centers: &[(&str, f64)]) -> Vec<(SectionId, Rect)> {
        centers
            .iter()
            .map(|(id, center)| {
                (
                    section(id),
                    Rect {
                        top: center - 50.0,
                        left: 0.0,
                        width: 1000.0,
                        height: 100.0,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn resolves_section_nearest_viewport_center() {
        let sections = layout(&[("hero", -200.0), ("work", 420.0), ("team", 900.0)]);
        assert_eq!(
            resolve_active_section(800.0, &sections),
            Some(section("work"))
        );
        assert_eq!(resolve_active_section(800.0, &[]), None);
    }

    #[test]
    fn lock_suppresses_other_sections_but_never_its_target() {
        let now = Instant::now();
        let mut lock = MenuLockContext::new(now);
        lock.lock(section("team"), DEFAULT_LOCK_HOLD, now);

        let mid = now + Duration::from_millis(800);
        assert!(lock.suppresses(&section("work"), mid));
        assert!(!lock.suppresses(&section("team"), mid));

        let after = now + Duration::from_millis(1700);
        assert!(!lock.suppresses(&section("work"), after));
        assert!(lock.is_expired(after));
    }

    #[test]
    fn anchor_click_scrolls_locks_and_tracks_through_expiry() {
        let now = Instant::now();
        let mut scroll = MockScrollEngine::new();
        scroll
            .expect_scroll_to()
            .withf(|target, _| target == "team")
            .times(1)
            .return_const(());
        let mut nav = NavController::new(Arc::new(scroll), now);

        nav.anchor_clicked(section("team"), now);
        assert_eq!(nav.active_section(), Some(&section("team")));

        // While the scroll animates, a measurement pointing elsewhere
        // is suppressed and the highlight stays put.
        let sections = layout(&[("work", 400.0), ("team", 2000.0)]);
        let mid = now + Duration::from_millis(500);
        assert_eq!(nav.observe_scroll(800.0, &sections, mid), None);
        assert_eq!(nav.active_section(), Some(&section("team")));

        // Once the hold expires, tracking follows the viewport again.
        let after = now + DEFAULT_LOCK_HOLD + Duration::from_millis(1);
        assert_eq!(
            nav.observe_scroll(800.0, &sections, after),
            Some(section("work"))
        );
    }

    #[test]
    fn observe_scroll_reports_only_changes() {
        let now = Instant::now();
        let mut nav = NavController::new(Arc::new(MockScrollEngine::new()), now);
        let sections = layout(&[("hero", 400.0), ("work", 1200.0)]);

        assert_eq!(
            nav.observe_scroll(800.0, &sections, now),
            Some(section("hero"))
        );
        assert_eq!(nav.observe_scroll(800.0, &sections, now), None);
    }

    #[test]
    fn menu_toggle_is_ignored_mid_transition() {
        let now = Instant::now();
        let mut nav = NavController::new(Arc::new(MockScrollEngine::new()), now);

        assert_eq!(nav.toggle_menu(), Some(MenuPhase::Opening));
        assert_eq!(nav.toggle_menu(), None);
        nav.menu_transition_finished();
        assert_eq!(nav.menu_phase(), MenuPhase::Open);

        assert_eq!(nav.toggle_menu(), Some(MenuPhase::Closing));
        assert_eq!(nav.toggle_menu(), None);
        nav.menu_transition_finished();
        assert_eq!(nav.menu_phase(), MenuPhase::Closed);
    }

    #[test]
    fn anchor_click_closes_an_open_menu() {
        let now = Instant::now();
        let mut scroll = MockScrollEngine::new();
        scroll.expect_scroll_to().return_const(());
        let mut nav = NavController::new(Arc::new(scroll), now);

        nav.toggle_menu();
        nav.menu_transition_finished();
        assert_eq!(nav.menu_phase(), MenuPhase::Open);

        nav.anchor_clicked(section("contact"), now);
        assert_eq!(nav.menu_phase(), MenuPhase::Closing);
    }
}
