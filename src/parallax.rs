use crate::{
    curve::remap_clamped,
    foundation::core::{Point, Rect, Vec2},
    foundation::error::{SkrollaError, SkrollaResult},
    property::ComputedStyle,
    spring::{Spring, SpringConfig},
};

/// Gain applied to the normalized pointer offset before smoothing. The
/// raw offset spans -1..1 across the tracked region; the filter state
/// therefore stays within a tenth of the mapped range, keeping the
/// effect subtle.
const POINTER_GAIN: f64 = 0.1;

/// Half-width of the smoothed-offset domain mapped onto layer outputs.
const MAP_HALF_RANGE: f64 = 0.5;

/// Pixel translation at full deflection for the stock layers.
pub const DEFAULT_TRANSLATE_PX: f64 = 30.0;

/// One pointer-driven layer.
///
/// `factor` scales and signs the shared smoothed offset: +1 follows the
/// pointer, -1 counters it, so paired columns drift apart.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct ParallaxLayer {
    pub id: String,
    pub factor: f64,
    /// Pixel translation at full deflection.
    pub translate_px: f64,
    /// Tilt in degrees at full horizontal deflection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tilt_deg: Option<f64>,
}

impl ParallaxLayer {
    /// Layer drifting with the pointer.
    pub fn follow(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            factor: 1.0,
            translate_px: DEFAULT_TRANSLATE_PX,
            tilt_deg: None,
        }
    }

    /// Layer drifting against the pointer.
    pub fn counter(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            factor: -1.0,
            translate_px: DEFAULT_TRANSLATE_PX,
            tilt_deg: None,
        }
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        if self.id.trim().is_empty() {
            return Err(SkrollaError::validation("parallax layer id must be non-empty"));
        }
        if !self.factor.is_finite() {
            return Err(SkrollaError::validation("parallax factor must be finite"));
        }
        if !self.translate_px.is_finite() {
            return Err(SkrollaError::validation(
                "parallax translation must be finite",
            ));
        }
        if let Some(tilt) = self.tilt_deg {
            if !tilt.is_finite() {
                return Err(SkrollaError::validation("parallax tilt must be finite"));
            }
        }
        Ok(())
    }
}

/// Pointer-driven parallax rig: normalizes pointer positions against a
/// tracked region, smooths them through a spring pair, and maps the
/// filtered offset onto per-layer translations and tilts.
#[derive(Clone, Copy, Debug)]
pub struct PointerTracker {
    spring_x: Spring,
    spring_y: Spring,
}

impl PointerTracker {
    pub fn new(config: SpringConfig) -> Self {
        Self {
            spring_x: Spring::new(config, 0.0),
            spring_y: Spring::new(config, 0.0),
        }
    }

    /// Retarget the filter from a raw pointer position over `region`.
    ///
    /// Degenerate regions are a guarded no-op; an element that has not
    /// been laid out yet cannot define a deflection.
    pub fn set_pointer(&mut self, pointer: Point, region: Rect) {
        if region.width() <= 0.0 || region.height() <= 0.0 {
            return;
        }
        let center = region.center();
        let nx = (pointer.x - center.x) / (region.width() / 2.0);
        let ny = (pointer.y - center.y) / (region.height() / 2.0);
        self.spring_x.set_target(nx * POINTER_GAIN);
        self.spring_y.set_target(ny * POINTER_GAIN);
    }

    /// Ease back to rest, as when the pointer leaves the region.
    pub fn clear(&mut self) {
        self.spring_x.set_target(0.0);
        self.spring_y.set_target(0.0);
    }

    /// Advance the smoothing filter by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> Vec2 {
        Vec2::new(self.spring_x.step(dt), self.spring_y.step(dt))
    }

    /// Current smoothed offset.
    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.spring_x.position(), self.spring_y.position())
    }

    pub fn is_settled(&self) -> bool {
        self.spring_x.is_settled() && self.spring_y.is_settled()
    }

    /// Style produced by the current offset for one layer.
    pub fn layer_style(&self, layer: &ParallaxLayer) -> ComputedStyle {
        let offset = self.offset();
        let tx = remap_clamped(
            offset.x,
            -MAP_HALF_RANGE,
            MAP_HALF_RANGE,
            -layer.translate_px,
            layer.translate_px,
        ) * layer.factor;
        let ty = remap_clamped(
            offset.y,
            -MAP_HALF_RANGE,
            MAP_HALF_RANGE,
            -layer.translate_px,
            layer.translate_px,
        ) * layer.factor;
        let rotation_deg = layer.tilt_deg.map_or(0.0, |tilt| {
            remap_clamped(offset.x, -MAP_HALF_RANGE, MAP_HALF_RANGE, -tilt, tilt) * layer.factor
        });

        ComputedStyle {
            translate: Vec2::new(tx, ty),
            rotation_deg,
            ..ComputedStyle::default()
        }
    }
}
