use crate::foundation::error::{SkrollaError, SkrollaResult};

/// Integration substep in seconds. Samples arrive at display-refresh
/// cadence; sub-stepping keeps the explicit integrator stable for stiff
/// configurations regardless of the host's frame timing.
const SUBSTEP_SECS: f64 = 1.0 / 240.0;

/// Upper bound on wall-clock time applied per `step` call. Hosts that
/// suspend sampling (background tabs) deliver one huge delta on resume;
/// clamping it resumes the filter smoothly instead of fast-forwarding.
const MAX_STEP_SECS: f64 = 0.25;

/// Distance from target below which the filter is considered at rest.
const REST_DELTA: f64 = 1e-3;

/// Speed below which the filter is considered at rest.
const REST_SPEED: f64 = 1e-3;

/// Second-order spring parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpringConfig {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

impl Default for SpringConfig {
    /// The pointer-smoothing filter: soft and heavily damped, so parallax
    /// output trails the pointer without ringing.
    fn default() -> Self {
        Self {
            stiffness: 50.0,
            damping: 20.0,
            mass: 1.0,
        }
    }
}

impl SpringConfig {
    /// Create a validated configuration.
    pub fn new(stiffness: f64, damping: f64, mass: f64) -> SkrollaResult<Self> {
        let config = Self {
            stiffness,
            damping,
            mass,
        };
        config.validate()?;
        Ok(config)
    }

    /// Fastest non-overshooting response for a unit mass at `stiffness`.
    pub fn critically_damped(stiffness: f64) -> Self {
        Self {
            stiffness,
            damping: 2.0 * stiffness.sqrt(),
            mass: 1.0,
        }
    }

    pub fn validate(&self) -> SkrollaResult<()> {
        if !self.stiffness.is_finite() || self.stiffness <= 0.0 {
            return Err(SkrollaError::validation("spring stiffness must be > 0"));
        }
        if !self.damping.is_finite() || self.damping < 0.0 {
            return Err(SkrollaError::validation("spring damping must be >= 0"));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(SkrollaError::validation("spring mass must be > 0"));
        }
        Ok(())
    }
}

/// Damped spring filter tracking a moving target.
///
/// The output at any instant depends on the decaying history of targets,
/// not just the latest one; retargeting never jumps the output. Advanced
/// explicitly via [`Spring::step`] with wall-clock deltas.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Spring at rest at `initial`.
    pub fn new(config: SpringConfig, initial: f64) -> Self {
        Self {
            config,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Retarget without disturbing the current position or velocity.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Jump to `value` and come to rest there.
    pub fn snap(&mut self, value: f64) {
        self.position = value;
        self.velocity = 0.0;
        self.target = value;
    }

    /// At rest exactly on the target.
    pub fn is_settled(&self) -> bool {
        self.position == self.target && self.velocity == 0.0
    }

    /// Advance the filter by `dt` seconds and return the new position.
    ///
    /// Semi-implicit Euler over fixed substeps. Non-positive or non-finite
    /// deltas leave the state untouched.
    pub fn step(&mut self, dt: f64) -> f64 {
        if !dt.is_finite() || dt <= 0.0 {
            return self.position;
        }

        let mut remaining = dt.min(MAX_STEP_SECS);
        while remaining > 0.0 {
            let h = remaining.min(SUBSTEP_SECS);
            let accel = (self.config.stiffness * (self.target - self.position)
                - self.config.damping * self.velocity)
                / self.config.mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
            remaining -= h;
        }

        if (self.position - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED {
            self.position = self.target;
            self.velocity = 0.0;
        }

        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(spring: &mut Spring, secs: f64) {
        let steps = (secs * 60.0).round() as u64;
        for _ in 0..steps {
            spring.step(1.0 / 60.0);
        }
    }

    #[test]
    fn default_matches_pointer_filter_constants() {
        let config = SpringConfig::default();
        assert_eq!(config.stiffness, 50.0);
        assert_eq!(config.damping, 20.0);
        assert_eq!(config.mass, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn converges_and_settles_exactly() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        run(&mut spring, 10.0);
        assert!(spring.is_settled());
        assert_eq!(spring.position(), 1.0);
    }

    #[test]
    fn critically_damped_never_overshoots() {
        let mut spring = Spring::new(SpringConfig::critically_damped(100.0), 0.0);
        spring.set_target(1.0);
        let mut max = 0.0f64;
        for _ in 0..600 {
            max = max.max(spring.step(1.0 / 60.0));
        }
        assert!(max <= 1.0 + 1e-9);
        assert!(spring.is_settled());
    }

    #[test]
    fn underdamped_overshoots() {
        let config = SpringConfig::new(100.0, 5.0, 1.0).unwrap();
        let mut spring = Spring::new(config, 0.0);
        spring.set_target(1.0);
        let mut max = 0.0f64;
        for _ in 0..240 {
            max = max.max(spring.step(1.0 / 60.0));
        }
        assert!(max > 1.1);
    }

    #[test]
    fn bad_deltas_are_no_ops() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        assert_eq!(spring.step(0.0), 0.0);
        assert_eq!(spring.step(-1.0), 0.0);
        assert_eq!(spring.step(f64::NAN), 0.0);
        assert_eq!(spring.velocity(), 0.0);
    }

    #[test]
    fn huge_delta_is_clamped_not_exploded() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        let pos = spring.step(3600.0);
        assert!(pos.is_finite());
        // Overdamped: never passes the target.
        assert!(pos <= 1.0 + 1e-9);
    }

    #[test]
    fn retarget_preserves_continuity() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        run(&mut spring, 0.2);
        let mid = spring.position();
        assert!(mid > 0.0 && mid < 1.0);

        spring.set_target(-1.0);
        assert_eq!(spring.position(), mid);
        run(&mut spring, 10.0);
        assert_eq!(spring.position(), -1.0);
    }

    #[test]
    fn snap_comes_to_rest() {
        let mut spring = Spring::new(SpringConfig::default(), 0.0);
        spring.set_target(1.0);
        run(&mut spring, 0.1);
        spring.snap(0.5);
        assert!(spring.is_settled());
        assert_eq!(spring.position(), 0.5);
    }

    #[test]
    fn non_finite_target_is_ignored() {
        let mut spring = Spring::new(SpringConfig::default(), 0.25);
        spring.set_target(f64::NAN);
        assert_eq!(spring.target(), 0.25);
    }

    #[test]
    fn config_validation() {
        assert!(SpringConfig::new(0.0, 20.0, 1.0).is_err());
        assert!(SpringConfig::new(50.0, -1.0, 1.0).is_err());
        assert!(SpringConfig::new(50.0, 20.0, 0.0).is_err());
        assert!(SpringConfig::new(f64::INFINITY, 20.0, 1.0).is_err());
        assert!(SpringConfig::new(50.0, 0.0, 1.0).is_ok());
    }
}
