use crate::{
    curve::{Breakpoint, ProgressCurve},
    foundation::error::{SkrollaError, SkrollaResult},
    window::ScrollWindow,
};

/// Fraction of a segment occupied by each crossfade handoff.
pub const CROSSFADE_FRACTION: f64 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// One gallery entry. A missing or unreadable `source` degrades to a
/// placeholder at the presentation layer; it is not a validation error.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MediaItem {
    pub kind: MediaKind,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MediaItem {
    pub fn image(source: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            source: source.into(),
            alt: None,
            caption: None,
            link: None,
        }
    }

    pub fn video(source: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            source: source.into(),
            alt: None,
            caption: None,
            link: None,
        }
    }
}

/// How per-item opacity curves are derived for a sequence.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceFades {
    /// Evenly partitioned segments with crossfade handoffs.
    Segments,
    /// Explicit per-item opacity curves; length must match the item count.
    Custom(Vec<ProgressCurve>),
}

/// Ordered media items mapped onto one shared observation window.
///
/// Each item gets its own opacity curve over the window's progress, so a
/// single scroll sweep plays the whole gallery.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct MediaSequence {
    pub items: Vec<MediaItem>,
    pub window: ScrollWindow,
    pub fades: SequenceFades,
}

impl MediaSequence {
    /// Sequence over `window` using the segment-crossfade policy.
    pub fn segments(items: Vec<MediaItem>, window: ScrollWindow) -> Self {
        Self {
            items,
            window,
            fades: SequenceFades::Segments,
        }
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        if self.items.is_empty() {
            return Err(SkrollaError::validation(
                "MediaSequence must have at least one item",
            ));
        }
        if let SequenceFades::Custom(curves) = &self.fades {
            if curves.len() != self.items.len() {
                return Err(SkrollaError::validation(format!(
                    "MediaSequence has {} items but {} custom curves",
                    self.items.len(),
                    curves.len()
                )));
            }
            for curve in curves {
                curve.validate()?;
            }
        }
        Ok(())
    }

    /// Resolve one opacity curve per item.
    pub fn opacity_curves(&self) -> SkrollaResult<Vec<ProgressCurve>> {
        self.validate()?;
        match &self.fades {
            SequenceFades::Segments => (0..self.items.len())
                .map(|index| crossfade_curve(index, self.items.len()))
                .collect(),
            SequenceFades::Custom(curves) => Ok(curves.clone()),
        }
    }
}

/// Opacity curve for item `index` of `count` under the segment policy.
///
/// The window is split into `count` equal segments. Each handoff spends
/// 10% of a segment: the outgoing item's fade-out interval is exactly the
/// incoming item's fade-in interval, so opacities trade sum-preserving
/// and at most two adjacent items are partially visible at once. The
/// first item opens the window already opaque; the last holds through
/// progress 1.
pub fn crossfade_curve(index: usize, count: usize) -> SkrollaResult<ProgressCurve> {
    if count == 0 {
        return Err(SkrollaError::animation(
            "crossfade requires at least one item",
        ));
    }
    if index >= count {
        return Err(SkrollaError::animation(format!(
            "crossfade item index {index} out of range for {count} items"
        )));
    }

    let width = 1.0 / count as f64;
    let fade = width * CROSSFADE_FRACTION;
    // Segment bounds derive from the index alone so that adjacent items
    // share bit-identical handoff breakpoints.
    let start = index as f64 * width;
    let end = (index + 1) as f64 * width;

    let mut points = Vec::with_capacity(4);
    if index == 0 {
        points.push(Breakpoint::new(0.0, 1.0));
    } else {
        points.push(Breakpoint::new(start, 0.0));
        points.push(Breakpoint::new(start + fade, 1.0));
    }
    if index + 1 == count {
        points.push(Breakpoint::new(1.0, 1.0));
    } else {
        points.push(Breakpoint::new(end, 1.0));
        points.push(Breakpoint::new(end + fade, 0.0));
    }

    ProgressCurve::new(points)
}
