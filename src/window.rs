use crate::foundation::core::{ElementSpan, Viewport};

/// Edge of a tracked element, in document flow order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementEdge {
    Start,
    Center,
    End,
}

/// Edge of the viewport, in scroll direction order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewportEdge {
    Start,
    Center,
    End,
}

/// One "element edge meets viewport edge" alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    pub element: ElementEdge,
    pub viewport: ViewportEdge,
}

impl Anchor {
    pub const fn new(element: ElementEdge, viewport: ViewportEdge) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which this alignment holds for `span` in `viewport`.
    fn offset(self, span: ElementSpan, viewport: Viewport) -> f64 {
        let element_pos = match self.element {
            ElementEdge::Start => span.top,
            ElementEdge::Center => span.center(),
            ElementEdge::End => span.bottom(),
        };
        let viewport_pos = match self.viewport {
            ViewportEdge::Start => 0.0,
            ViewportEdge::Center => viewport.height / 2.0,
            ViewportEdge::End => viewport.height,
        };
        element_pos - viewport_pos
    }
}

/// Observation window for one tracked element.
///
/// Progress runs 0 at the `enter` alignment and 1 at the `exit` alignment.
/// The window itself is pure configuration; combining it with an element
/// span and viewport produces a [`ResolvedWindow`] in scroll-offset space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScrollWindow {
    pub enter: Anchor,
    pub exit: Anchor,
}

impl ScrollWindow {
    pub const fn new(enter: Anchor, exit: Anchor) -> Self {
        Self { enter, exit }
    }

    /// Full traversal: progress 0 when the element's top reaches the
    /// viewport bottom, 1 when its bottom leaves the viewport top.
    pub const fn traverse() -> Self {
        Self::new(
            Anchor::new(ElementEdge::Start, ViewportEdge::End),
            Anchor::new(ElementEdge::End, ViewportEdge::Start),
        )
    }

    /// Containment: progress 0 when the element's top reaches the viewport
    /// top, 1 when its bottom reaches the viewport bottom. Used for tall
    /// containers with pinned content; degenerate when the element is not
    /// taller than the viewport.
    pub const fn contain() -> Self {
        Self::new(
            Anchor::new(ElementEdge::Start, ViewportEdge::Start),
            Anchor::new(ElementEdge::End, ViewportEdge::End),
        )
    }

    /// Resolve the window against a geometry snapshot.
    pub fn resolve(self, span: ElementSpan, viewport: Viewport) -> ResolvedWindow {
        ResolvedWindow {
            start: self.enter.offset(span, viewport),
            end: self.exit.offset(span, viewport),
        }
    }
}

/// Scroll-offset interval a window resolves to for a concrete layout.
///
/// Invalidated whenever the element span or viewport changes.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedWindow {
    /// Scroll offset at which progress is 0.
    pub start: f64,
    /// Scroll offset at which progress is 1.
    pub end: f64,
}

impl ResolvedWindow {
    /// Length of the interval in scroll pixels.
    pub fn span(self) -> f64 {
        self.end - self.start
    }

    /// Normalized progress at `scroll_offset`, clamped to 0..1.
    ///
    /// A degenerate window (zero or negative span) pins progress to 0, so
    /// the element holds its clamped start state. Pure function of the
    /// offset: sweeping forward and back yields identical values.
    pub fn progress(self, scroll_offset: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((scroll_offset - self.start) / span).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_interpolates_and_clamps() {
        let window = ResolvedWindow {
            start: 1000.0,
            end: 3000.0,
        };
        assert_eq!(window.progress(1000.0), 0.0);
        assert_eq!(window.progress(2000.0), 0.5);
        assert_eq!(window.progress(3000.0), 1.0);
        assert_eq!(window.progress(500.0), 0.0);
        assert_eq!(window.progress(3500.0), 1.0);
    }

    #[test]
    fn degenerate_window_pins_progress_to_zero() {
        let window = ResolvedWindow {
            start: 1000.0,
            end: 1000.0,
        };
        assert_eq!(window.progress(500.0), 0.0);
        assert_eq!(window.progress(1000.0), 0.0);
        assert_eq!(window.progress(2000.0), 0.0);
    }

    #[test]
    fn progress_is_monotonic_and_reversible() {
        let window = ResolvedWindow {
            start: 0.0,
            end: 800.0,
        };
        let mut prev = -1.0;
        for i in 0..=40 {
            let p = window.progress(f64::from(i) * 20.0);
            assert!(p >= prev);
            prev = p;
        }
        // Sweeping back yields the same values; no hidden state.
        assert_eq!(window.progress(400.0), 0.5);
        assert_eq!(window.progress(800.0), 1.0);
        assert_eq!(window.progress(400.0), 0.5);
    }

    #[test]
    fn traverse_resolves_to_full_crossing() {
        let viewport = Viewport::new(1280.0, 800.0).unwrap();
        let span = ElementSpan::new(2000.0, 600.0).unwrap();
        let resolved = ScrollWindow::traverse().resolve(span, viewport);

        // Element top meets viewport bottom.
        assert_eq!(resolved.start, 1200.0);
        // Element bottom meets viewport top.
        assert_eq!(resolved.end, 2600.0);
    }

    #[test]
    fn contain_resolves_to_inner_travel() {
        let viewport = Viewport::new(1280.0, 800.0).unwrap();
        let span = ElementSpan::new(4000.0, 1600.0).unwrap();
        let resolved = ScrollWindow::contain().resolve(span, viewport);

        assert_eq!(resolved.start, 4000.0);
        assert_eq!(resolved.end, 4800.0);
        assert!(resolved.span() > 0.0);
    }

    #[test]
    fn contain_degenerates_for_short_elements() {
        // An element no taller than the viewport cannot travel within it.
        let viewport = Viewport::new(1280.0, 800.0).unwrap();
        let span = ElementSpan::new(4000.0, 500.0).unwrap();
        let resolved = ScrollWindow::contain().resolve(span, viewport);
        assert!(resolved.span() <= 0.0);
        assert_eq!(resolved.progress(4100.0), 0.0);
    }

    #[test]
    fn center_anchors_resolve_midpoints() {
        let viewport = Viewport::new(1280.0, 800.0).unwrap();
        let span = ElementSpan::new(1000.0, 400.0).unwrap();
        let window = ScrollWindow::new(
            Anchor::new(ElementEdge::Center, ViewportEdge::Center),
            Anchor::new(ElementEdge::End, ViewportEdge::Start),
        );
        let resolved = window.resolve(span, viewport);
        // Element center (1200) meets viewport center (400).
        assert_eq!(resolved.start, 800.0);
        assert_eq!(resolved.end, 1400.0);
    }
}
