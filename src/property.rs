use crate::{
    curve::ProgressCurve,
    foundation::core::Vec2,
    foundation::error::SkrollaResult,
};

/// Style attribute a progress curve can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Opacity,
    Scale,
    TranslateX,
    TranslateY,
    Rotate,
}

/// One style attribute bound to a progress curve.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AnimatedProperty {
    pub kind: PropertyKind,
    pub curve: ProgressCurve,
}

impl AnimatedProperty {
    pub fn new(kind: PropertyKind, curve: ProgressCurve) -> Self {
        Self { kind, curve }
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        self.curve.validate()
    }
}

/// Resolved style values for one element at one sample.
///
/// Translation is in pixels, rotation in degrees. Defaults are the rest
/// state: fully opaque, unscaled, untranslated.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct ComputedStyle {
    pub opacity: f64, // 0..1 clamped
    pub scale: f64,
    pub translate: Vec2,
    pub rotation_deg: f64,
}

impl Default for ComputedStyle {
    fn default() -> Self {
        Self {
            opacity: 1.0,
            scale: 1.0,
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
        }
    }
}

impl ComputedStyle {
    /// Write one property value into the bundle.
    pub fn set(&mut self, kind: PropertyKind, value: f64) {
        match kind {
            PropertyKind::Opacity => self.opacity = value.clamp(0.0, 1.0),
            PropertyKind::Scale => self.scale = value,
            PropertyKind::TranslateX => self.translate.x = value,
            PropertyKind::TranslateY => self.translate.y = value,
            PropertyKind::Rotate => self.rotation_deg = value,
        }
    }
}

/// Evaluate a property set at `progress`, starting from the rest state.
///
/// Properties are applied in declaration order; a later binding to the
/// same kind overwrites the earlier one.
pub fn evaluate_properties(properties: &[AnimatedProperty], progress: f64) -> ComputedStyle {
    let mut style = ComputedStyle::default();
    for property in properties {
        style.set(property.kind, property.curve.evaluate(progress));
    }
    style
}
