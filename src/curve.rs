use crate::foundation::error::{SkrollaError, SkrollaResult};

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Map `v` from `[in_min, in_max]` onto `[out_min, out_max]`, clamping at
/// both ends of the input range.
pub fn remap_clamped(v: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    let denom = in_max - in_min;
    if denom == 0.0 {
        return out_min;
    }
    let t = ((v - in_min) / denom).clamp(0.0, 1.0);
    lerp(out_min, out_max, t)
}

/// One stop of a piecewise-linear curve.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Breakpoint {
    /// Position in progress space, 0..1.
    pub input: f64,
    /// Style value produced at `input`.
    pub output: f64,
}

impl Breakpoint {
    pub fn new(input: f64, output: f64) -> Self {
        Self { input, output }
    }
}

/// Piecewise-linear mapping from normalized progress to a style value.
///
/// Breakpoints are sorted by input. Progress before the first breakpoint
/// clamps to the first output, progress past the last clamps to the last.
/// Two breakpoints sharing an input form a step: the later output wins at
/// that exact progress.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressCurve {
    pub points: Vec<Breakpoint>, // sorted by input
}

impl ProgressCurve {
    /// Create a validated curve.
    pub fn new(points: Vec<Breakpoint>) -> SkrollaResult<Self> {
        let curve = Self { points };
        curve.validate()?;
        Ok(curve)
    }

    /// Create a validated curve from `(input, output)` pairs.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> SkrollaResult<Self> {
        Self::new(
            pairs
                .iter()
                .map(|&(input, output)| Breakpoint { input, output })
                .collect(),
        )
    }

    /// Curve that ignores progress and always yields `value`.
    pub fn constant(value: f64) -> Self {
        Self {
            points: vec![Breakpoint {
                input: 0.0,
                output: value,
            }],
        }
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        if self.points.is_empty() {
            return Err(SkrollaError::animation(
                "ProgressCurve must have at least one breakpoint",
            ));
        }
        for p in &self.points {
            if !p.input.is_finite() || !(0.0..=1.0).contains(&p.input) {
                return Err(SkrollaError::animation(
                    "ProgressCurve inputs must be finite and within 0..1",
                ));
            }
            if !p.output.is_finite() {
                return Err(SkrollaError::animation(
                    "ProgressCurve outputs must be finite",
                ));
            }
        }
        if !self.points.windows(2).all(|w| w[0].input <= w[1].input) {
            return Err(SkrollaError::animation(
                "ProgressCurve breakpoints must be sorted by input",
            ));
        }
        Ok(())
    }

    /// Sample the curve at `progress`.
    pub fn evaluate(&self, progress: f64) -> f64 {
        let idx = self.points.partition_point(|p| p.input <= progress);

        if idx == 0 {
            return self.points[0].output;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].output;
        }

        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        let denom = b.input - a.input;
        if denom <= 0.0 {
            return a.output;
        }

        let t = (progress - a.input) / denom;
        lerp(a.output, b.output, t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_clamp() {
        let curve = ProgressCurve::from_pairs(&[(0.2, 10.0), (0.8, 20.0)]).unwrap();
        assert_eq!(curve.evaluate(0.0), 10.0);
        assert_eq!(curve.evaluate(-5.0), 10.0);
        assert_eq!(curve.evaluate(1.0), 20.0);
        assert_eq!(curve.evaluate(5.0), 20.0);
    }

    #[test]
    fn interpolates_between_breakpoints() {
        let curve = ProgressCurve::from_pairs(&[(0.0, 0.0), (1.0, 100.0)]).unwrap();
        assert_eq!(curve.evaluate(0.25), 25.0);
        assert_eq!(curve.evaluate(0.5), 50.0);
    }

    #[test]
    fn exact_breakpoint_yields_exact_output() {
        let curve = ProgressCurve::from_pairs(&[(0.0, 0.0), (0.15, 1.0), (0.85, 1.0), (1.0, 0.0)])
            .unwrap();
        assert_eq!(curve.evaluate(0.15), 1.0);
        assert_eq!(curve.evaluate(0.85), 1.0);
        assert_eq!(curve.evaluate(0.5), 1.0);
    }

    #[test]
    fn showcase_opacity_shape() {
        // Fade in over the first 15%, hold, fade out over the last 15%.
        let curve = ProgressCurve::from_pairs(&[(0.0, 0.0), (0.15, 1.0), (0.85, 1.0), (1.0, 0.0)])
            .unwrap();
        assert!((curve.evaluate(0.075) - 0.5).abs() < 1e-12);
        assert!((curve.evaluate(0.925) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn duplicate_input_forms_step() {
        let curve =
            ProgressCurve::from_pairs(&[(0.0, 0.0), (0.5, 1.0), (0.5, 0.0), (1.0, 0.0)]).unwrap();
        // Left limit interpolates toward the earlier output.
        assert!((curve.evaluate(0.499) - 0.998).abs() < 1e-9);
        // At the shared input the later output wins.
        assert_eq!(curve.evaluate(0.5), 0.0);
        assert_eq!(curve.evaluate(0.6), 0.0);
    }

    #[test]
    fn constant_ignores_progress() {
        let curve = ProgressCurve::constant(0.92);
        assert_eq!(curve.evaluate(0.0), 0.92);
        assert_eq!(curve.evaluate(1.0), 0.92);
    }

    #[test]
    fn validate_rejects_unsorted_inputs() {
        let curve = ProgressCurve {
            points: vec![Breakpoint::new(0.5, 0.0), Breakpoint::new(0.2, 1.0)],
        };
        assert!(curve.validate().is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_inputs() {
        assert!(ProgressCurve::from_pairs(&[(-0.1, 0.0), (1.0, 1.0)]).is_err());
        assert!(ProgressCurve::from_pairs(&[(0.0, 0.0), (1.5, 1.0)]).is_err());
    }

    #[test]
    fn validate_rejects_non_finite() {
        assert!(ProgressCurve::from_pairs(&[(0.0, f64::NAN)]).is_err());
        assert!(ProgressCurve::from_pairs(&[(f64::NAN, 0.0)]).is_err());
        assert!(ProgressCurve::new(vec![]).is_err());
    }

    #[test]
    fn remap_clamps_outside_input_range() {
        assert_eq!(remap_clamped(-0.5, -0.5, 0.5, -30.0, 30.0), -30.0);
        assert_eq!(remap_clamped(0.5, -0.5, 0.5, -30.0, 30.0), 30.0);
        assert_eq!(remap_clamped(0.0, -0.5, 0.5, -30.0, 30.0), 0.0);
        assert_eq!(remap_clamped(2.0, -0.5, 0.5, -30.0, 30.0), 30.0);
    }
}
