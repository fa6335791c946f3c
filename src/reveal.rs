use crate::{
    curve::lerp,
    ease::Ease,
    foundation::error::{SkrollaError, SkrollaResult},
    property::ComputedStyle,
};

/// Visible fraction at which an element counts as on screen.
pub const DEFAULT_IN_VIEW_THRESHOLD: f64 = 0.1;

/// Starting offsets for a reveal; each eases to its resting value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealFrom {
    /// Starting opacity, rest is 1.
    pub opacity: f64,
    /// Starting vertical offset in pixels, rest is 0.
    pub translate_y: f64,
    /// Starting scale, rest is 1.
    pub scale: f64,
}

/// Entrance transition played on a wall-clock timeline once an element
/// crosses the visibility threshold, and replayed on every re-entry.
///
/// Unlike scroll-driven curves a reveal is a function of elapsed time,
/// so it is the one piece of visual state that is not reversible by
/// scrolling back.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
pub struct Reveal {
    pub delay_secs: f64,
    pub duration_secs: f64,
    pub ease: Ease,
    pub from: RevealFrom,
}

impl Reveal {
    /// Rise-and-fade-in used for headings and captions.
    pub fn fade_up() -> Self {
        Self {
            delay_secs: 0.0,
            duration_secs: 1.0,
            ease: Ease::OutQuint,
            from: RevealFrom {
                opacity: 0.0,
                translate_y: 30.0,
                scale: 1.0,
            },
        }
    }

    /// Slow settle from a zoomed-in crop, used for media fills.
    pub fn zoom() -> Self {
        Self {
            delay_secs: 0.0,
            duration_secs: 1.5,
            ease: Ease::OutQuint,
            from: RevealFrom {
                opacity: 1.0,
                translate_y: 0.0,
                scale: 1.15,
            },
        }
    }

    pub fn with_delay(mut self, delay_secs: f64) -> Self {
        self.delay_secs = delay_secs;
        self
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        if !self.duration_secs.is_finite() || self.duration_secs <= 0.0 {
            return Err(SkrollaError::validation("reveal duration must be > 0"));
        }
        if !self.delay_secs.is_finite() || self.delay_secs < 0.0 {
            return Err(SkrollaError::validation("reveal delay must be >= 0"));
        }
        let from = self.from;
        if !from.opacity.is_finite() || !(0.0..=1.0).contains(&from.opacity) {
            return Err(SkrollaError::validation(
                "reveal starting opacity must be within 0..1",
            ));
        }
        if !from.translate_y.is_finite() {
            return Err(SkrollaError::validation(
                "reveal starting offset must be finite",
            ));
        }
        if !from.scale.is_finite() || from.scale < 0.0 {
            return Err(SkrollaError::validation("reveal starting scale must be >= 0"));
        }
        Ok(())
    }

    /// Eased timeline progress at `elapsed_secs` since the trigger.
    pub fn progress(&self, elapsed_secs: f64) -> f64 {
        if !elapsed_secs.is_finite() {
            return 0.0;
        }
        let t = ((elapsed_secs - self.delay_secs) / self.duration_secs).clamp(0.0, 1.0);
        self.ease.apply(t)
    }

    pub fn is_complete(&self, elapsed_secs: f64) -> bool {
        elapsed_secs >= self.delay_secs + self.duration_secs
    }

    /// Fold the reveal's contribution at `elapsed_secs` into `style`.
    ///
    /// Opacity and scale compose multiplicatively with the scroll-driven
    /// values, translation additively. `elapsed_secs` of 0 applies the
    /// full hidden state.
    pub fn apply_to(&self, style: &mut ComputedStyle, elapsed_secs: f64) {
        let eased = self.progress(elapsed_secs);
        let opacity = lerp(self.from.opacity, 1.0, eased);
        let translate_y = lerp(self.from.translate_y, 0.0, eased);
        let scale = lerp(self.from.scale, 1.0, eased);

        style.opacity = (style.opacity * opacity).clamp(0.0, 1.0);
        style.translate.y += translate_y;
        style.scale *= scale;
    }
}

/// Edge reported by [`InViewGate::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEvent {
    Entered,
    Exited,
    Unchanged,
}

/// Re-armable visibility trigger.
///
/// Tracks whether an element's visible fraction is at or above a
/// threshold and reports the edges. Elements re-arm when they leave the
/// viewport, so reveals replay on every entry.
#[derive(Clone, Copy, Debug)]
pub struct InViewGate {
    threshold: f64,
    in_view: bool,
}

impl Default for InViewGate {
    fn default() -> Self {
        Self::new(DEFAULT_IN_VIEW_THRESHOLD)
    }
}

impl InViewGate {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            in_view: false,
        }
    }

    pub fn is_in_view(&self) -> bool {
        self.in_view
    }

    /// Feed the current visible fraction and report any edge.
    pub fn update(&mut self, visible_fraction: f64) -> GateEvent {
        let now = visible_fraction > 0.0 && visible_fraction >= self.threshold;
        match (self.in_view, now) {
            (false, true) => {
                self.in_view = true;
                GateEvent::Entered
            }
            (true, false) => {
                self.in_view = false;
                GateEvent::Exited
            }
            _ => GateEvent::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_up_starts_hidden_and_ends_at_rest() {
        let reveal = Reveal::fade_up();
        let mut hidden = ComputedStyle::default();
        reveal.apply_to(&mut hidden, 0.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.translate.y, 30.0);
        assert_eq!(hidden.scale, 1.0);

        let mut done = ComputedStyle::default();
        reveal.apply_to(&mut done, 2.0);
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.translate.y, 0.0);
        assert!(reveal.is_complete(2.0));
    }

    #[test]
    fn delay_holds_the_hidden_state() {
        let reveal = Reveal::fade_up().with_delay(0.5);
        assert_eq!(reveal.progress(0.4), 0.0);
        assert!(reveal.progress(0.6) > 0.0);
        assert!(!reveal.is_complete(1.4));
        assert!(reveal.is_complete(1.5));
    }

    #[test]
    fn zoom_settles_scale() {
        let reveal = Reveal::zoom();
        let mut style = ComputedStyle::default();
        reveal.apply_to(&mut style, 0.0);
        assert_eq!(style.scale, 1.15);
        assert_eq!(style.opacity, 1.0);

        let mut mid = ComputedStyle::default();
        reveal.apply_to(&mut mid, 0.75);
        assert!(mid.scale > 1.0 && mid.scale < 1.15);
    }

    #[test]
    fn reveal_composes_with_scroll_style() {
        let reveal = Reveal::fade_up();
        let mut style = ComputedStyle {
            opacity: 0.5,
            translate: crate::foundation::core::Vec2::new(0.0, -10.0),
            ..ComputedStyle::default()
        };
        reveal.apply_to(&mut style, 0.0);
        assert_eq!(style.opacity, 0.0);
        assert_eq!(style.translate.y, 20.0);
    }

    #[test]
    fn validation_rejects_bad_timings() {
        let mut reveal = Reveal::fade_up();
        assert!(reveal.validate().is_ok());
        reveal.duration_secs = 0.0;
        assert!(reveal.validate().is_err());

        let mut reveal = Reveal::fade_up();
        reveal.delay_secs = -0.1;
        assert!(reveal.validate().is_err());

        let mut reveal = Reveal::fade_up();
        reveal.from.opacity = 1.5;
        assert!(reveal.validate().is_err());
    }

    #[test]
    fn gate_reports_edges_and_rearms() {
        let mut gate = InViewGate::default();
        assert!(!gate.is_in_view());
        assert_eq!(gate.update(0.05), GateEvent::Unchanged);
        assert_eq!(gate.update(0.25), GateEvent::Entered);
        assert_eq!(gate.update(0.8), GateEvent::Unchanged);
        assert_eq!(gate.update(0.0), GateEvent::Exited);
        // Re-entry triggers again.
        assert_eq!(gate.update(0.5), GateEvent::Entered);
    }

    #[test]
    fn gate_threshold_is_inclusive() {
        let mut gate = InViewGate::new(0.1);
        assert_eq!(gate.update(0.1), GateEvent::Entered);
    }

    #[test]
    fn zero_threshold_still_requires_some_visibility() {
        let mut gate = InViewGate::new(0.0);
        assert_eq!(gate.update(0.0), GateEvent::Unchanged);
        assert_eq!(gate.update(0.001), GateEvent::Entered);
    }
}
