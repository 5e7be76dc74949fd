//! Damped spring animation of a single scalar.
//!
//! Reset transitions tween each pose field toward its identity value with
//! one of these springs. Calling [`Spring::retarget`] mid-flight keeps the
//! current position and velocity, so overlapping animations blend into each
//! other instead of queuing.

/// Position/velocity considered close enough to the target to stop.
const SETTLE_TOLERANCE: f64 = 1e-3;

/// A critically damped spring by default; `tick` advances it with a
/// semi-implicit Euler step.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    pub current: f64,
    pub target: f64,
    pub velocity: f64,
    stiffness: f64,
    damping: f64,
    mass: f64,
}

impl Spring {
    const DEFAULT_STIFFNESS: f64 = 170.0;
    const DEFAULT_MASS: f64 = 1.0;

    /// Spring at `current`, heading for `target`, with the default
    /// critically damped tuning.
    pub fn new(current: f64, target: f64) -> Self {
        Self::with_tuning(
            current,
            target,
            Self::DEFAULT_STIFFNESS,
            Self::critical_damping(Self::DEFAULT_STIFFNESS, Self::DEFAULT_MASS),
            Self::DEFAULT_MASS,
        )
    }

    /// Spring with explicit stiffness/damping/mass. Non-positive stiffness
    /// or mass is bumped to a small epsilon so the integration stays finite.
    pub fn with_tuning(current: f64, target: f64, stiffness: f64, damping: f64, mass: f64) -> Self {
        Self {
            current,
            target,
            velocity: 0.0,
            stiffness: stiffness.max(1e-4),
            damping: damping.max(0.0),
            mass: mass.max(1e-4),
        }
    }

    /// Damping coefficient at which the spring returns to target as fast as
    /// possible without overshooting.
    pub fn critical_damping(stiffness: f64, mass: f64) -> f64 {
        2.0 * (stiffness.max(1e-4) * mass.max(1e-4)).sqrt()
    }

    /// Point the spring at a new target, keeping position and velocity.
    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump straight to `value` and stop.
    pub fn snap_to(&mut self, value: f64) {
        self.current = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Advance by `dt` seconds and return the new position.
    pub fn tick(&mut self, dt: f64) -> f64 {
        let dt = dt.max(1e-6);
        let acceleration =
            (self.stiffness * (self.target - self.current) - self.damping * self.velocity)
                / self.mass;
        self.velocity += acceleration * dt;
        self.current += self.velocity * dt;
        self.current
    }

    /// Whether the spring has effectively arrived at its target.
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < SETTLE_TOLERANCE
            && self.velocity.abs() < SETTLE_TOLERANCE
    }
}
