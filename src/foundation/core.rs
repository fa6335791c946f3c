use crate::foundation::error::{SkrollaError, SkrollaResult};

pub use kurbo::{Point, Rect, Vec2};

/// Viewport dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Create a validated viewport with finite, positive dimensions.
    pub fn new(width: f64, height: f64) -> SkrollaResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(SkrollaError::validation("Viewport dimensions must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(SkrollaError::validation("Viewport dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Full viewport as a rect anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Vertical extent of a tracked element in document coordinates.
///
/// `top` is measured from the document top, not the viewport, so a span
/// stays fixed while the page scrolls underneath it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementSpan {
    /// Distance from the document top to the element's top edge.
    pub top: f64,
    /// Element height, >= 0.
    pub height: f64,
}

impl ElementSpan {
    /// Create a validated span with finite coordinates and non-negative height.
    pub fn new(top: f64, height: f64) -> SkrollaResult<Self> {
        if !top.is_finite() || !height.is_finite() {
            return Err(SkrollaError::validation("ElementSpan must be finite"));
        }
        if height < 0.0 {
            return Err(SkrollaError::validation("ElementSpan height must be >= 0"));
        }
        Ok(Self { top, height })
    }

    /// Document position of the bottom edge.
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Document position of the vertical midpoint.
    pub fn center(self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Fraction of the element's height inside the viewport at `scroll_offset`.
    ///
    /// Zero-height spans report 0.
    pub fn visible_fraction(self, scroll_offset: f64, viewport: Viewport) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let view_top = scroll_offset;
        let view_bottom = scroll_offset + viewport.height;
        let overlap = self.bottom().min(view_bottom) - self.top.max(view_top);
        (overlap / self.height).clamp(0.0, 1.0)
    }
}
