//! Viewport geometry primitives for section visibility math.

/// Axis-aligned rectangle in viewport coordinates. `top` may be negative
/// when the element has scrolled past the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Height of the part of this rect inside a viewport of the given
    /// height, clamped to zero when fully off-screen.
    pub fn visible_height(&self, viewport_height: f64) -> f64 {
        let visible = self.bottom().min(viewport_height) - self.top.max(0.0);
        visible.max(0.0)
    }

    /// On-screen area, the quantity compared when picking the dominant
    /// section of the viewport.
    pub fn visible_area(&self, viewport_height: f64) -> f64 {
        self.visible_height(viewport_height) * self.width
    }
}
