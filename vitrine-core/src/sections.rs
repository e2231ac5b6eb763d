//! Section dominance and the page-wide color theme.
//!
//! As the page scrolls, the section covering the most viewport area
//! dictates the body colors. Measurements arrive in bursts, so theme
//! changes pass through a short grouping window and only the last
//! request in a burst is committed.

use std::time::{Duration, Instant};

use tracing::debug;
use vitrine_model::{Rect, SectionId};

/// Grouping window for theme changes.
pub const DEFAULT_GROUPING: Duration = Duration::from_millis(100);

/// Body colors contributed by a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: String,
    pub text: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_owned(),
            text: "#000000".to_owned(),
        }
    }
}

/// Section with the largest on-screen area, or `None` when nothing is
/// visible. Ties keep the earlier section in document order.
pub fn most_visible_section(
    viewport_height: f64,
    sections: &[(SectionId, Rect)],
) -> Option<SectionId> {
    let mut best = None;
    let mut best_area = 0.0;
    for (id, rect) in sections {
        let area = rect.visible_area(viewport_height);
        if area > best_area {
            best_area = area;
            best = Some(id.clone());
        }
    }
    best
}

/// Debounces theme changes behind a grouping window. Time is always an
/// explicit argument, so the director is a plain value with no timer of
/// its own.
#[derive(Debug, Clone)]
pub struct ThemeDirector {
    current: Theme,
    pending: Option<(Theme, Instant)>,
    grouping: Duration,
}

impl Default for ThemeDirector {
    fn default() -> Self {
        Self::new(Theme::default(), DEFAULT_GROUPING)
    }
}

impl ThemeDirector {
    pub fn new(initial: Theme, grouping: Duration) -> Self {
        Self {
            current: initial,
            pending: None,
            grouping,
        }
    }

    /// Ask for a theme. Starts or re-targets the grouping window; a
    /// request for the already-applied theme with nothing pending is
    /// absorbed.
    pub fn request(&mut self, theme: Theme, now: Instant) {
        if self.pending.is_none() && theme == self.current {
            return;
        }
        self.pending = Some((theme, now + self.grouping));
    }

    /// Commit the pending theme once its window has elapsed. Returns
    /// the theme to apply when the body must restyle.
    pub fn due(&mut self, now: Instant) -> Option<&Theme> {
        let deadline = self.pending.as_ref().map(|(_, deadline)| *deadline)?;
        if now < deadline {
            return None;
        }
        let (theme, _) = self.pending.take()?;
        if theme == self.current {
            return None;
        }
        debug!("switching body theme to {}", theme.background);
        self.current = theme;
        Some(&self.current)
    }

    pub fn current(&self) -> &Theme {
        &self.current
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}
