//! Animation driver abstraction and the damped-spring implementation.
//!
//! The controller never integrates physics itself. It hands a start value,
//! a target, and [`SpringParams`] to an [`Animator`], then pulls samples out
//! of it on every frame tick. Retargeting an animator that is already running
//! continues from the current value and velocity, so a directive that arrives
//! mid-flight never makes the panel jump.

#[cfg(test)]
#[path = "animator_test.rs"]
mod animator_test;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::consts::{REST_DISPLACEMENT, REST_SPEED, SPRING_DAMPING, SPRING_MASS, SPRING_STEP_SECS, SPRING_STIFFNESS};

/// Physical parameters of a damped spring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringParams {
    /// Velocity-proportional friction.
    pub damping: f64,
    /// Displacement-proportional restoring force.
    pub stiffness: f64,
    /// Mass of the animated body.
    pub mass: f64,
    /// Stop at the target instead of oscillating past it.
    pub overshoot_clamping: bool,
    /// Distance from target below which the spring may come to rest.
    pub rest_displacement: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            damping: SPRING_DAMPING,
            stiffness: SPRING_STIFFNESS,
            mass: SPRING_MASS,
            overshoot_clamping: true,
            rest_displacement: REST_DISPLACEMENT,
            rest_speed: REST_SPEED,
        }
    }
}

impl SpringParams {
    /// Ratio of actual to critical damping. Below 1.0 the spring oscillates.
    #[must_use]
    pub fn damping_ratio(&self) -> f64 {
        self.damping / (2.0 * (self.stiffness * self.mass).sqrt())
    }

    /// Reject parameters that would make the integration meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSpring`] naming the first bad field, or
    /// [`ConfigError::UnstableSpring`] when the fixed step would diverge.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("damping", self.damping, self.damping >= 0.0),
            ("stiffness", self.stiffness, self.stiffness > 0.0),
            ("mass", self.mass, self.mass > 0.0),
            ("rest_displacement", self.rest_displacement, self.rest_displacement > 0.0),
            ("rest_speed", self.rest_speed, self.rest_speed > 0.0),
        ];
        for (field, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(ConfigError::InvalidSpring { field, value });
            }
        }
        if !self.is_stable() {
            return Err(ConfigError::UnstableSpring {
                stiffness: self.stiffness,
                damping: self.damping,
                mass: self.mass,
            });
        }
        Ok(())
    }

    /// Whether semi-implicit Euler at `SPRING_STEP_SECS` stays bounded:
    /// `h²k/m + 2hc/m < 4`.
    #[must_use]
    pub fn is_stable(&self) -> bool {
        let h = SPRING_STEP_SECS;
        let stiff = h * h * self.stiffness / self.mass;
        let damp = 2.0 * h * self.damping / self.mass;
        stiff + damp < 4.0
    }
}

/// One interpolated value produced by an animator tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// The animated value after the tick.
    pub value: f64,
    /// Whether the animation reached its target and stopped on this tick.
    pub settled: bool,
}

/// A cancellable, retargetable source of interpolated values.
pub trait Animator {
    /// Animate from `from` toward `to`. If already running, this retargets the
    /// in-flight animation, keeping its current velocity.
    fn animate(&mut self, from: f64, to: f64, params: SpringParams);

    /// Stop the in-flight animation, if any, leaving the value where it is.
    fn cancel(&mut self);

    /// Advance by `dt`. Returns `None` when idle.
    fn step(&mut self, dt: Duration) -> Option<Sample>;

    /// Whether an animation is in flight.
    fn is_running(&self) -> bool;

    /// Target of the in-flight animation.
    fn target(&self) -> Option<f64>;
}

#[derive(Debug, Clone, Copy)]
struct SpringState {
    value: f64,
    velocity: f64,
    target: f64,
    /// Sign of `value - target` when the animation was (re)targeted.
    origin_side: f64,
    params: SpringParams,
}

/// Damped spring integrated with semi-implicit Euler at a fixed 1 ms step.
#[derive(Debug, Clone, Default)]
pub struct SpringAnimator {
    state: Option<SpringState>,
}

impl SpringAnimator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current velocity in units per second (zero when idle).
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.state.map_or(0.0, |s| s.velocity)
    }
}

impl Animator for SpringAnimator {
    fn animate(&mut self, from: f64, to: f64, params: SpringParams) {
        let velocity = self.velocity();
        let origin_side = (from - to).signum();
        if (from - to).abs() < params.rest_displacement && velocity.abs() < params.rest_speed {
            tracing::trace!(goal = to, "spring already at rest on target");
            self.state = None;
            return;
        }
        self.state = Some(SpringState { value: from, velocity, target: to, origin_side, params });
    }

    fn cancel(&mut self) {
        if self.state.take().is_some() {
            tracing::trace!("spring cancelled");
        }
    }

    fn step(&mut self, dt: Duration) -> Option<Sample> {
        let mut s = self.state?;
        let mut remaining = dt.as_secs_f64();
        let mut settled = false;

        while remaining > 0.0 && !settled {
            let h = remaining.min(SPRING_STEP_SECS);
            remaining -= h;

            let displacement = s.value - s.target;
            let accel = (-s.params.stiffness * displacement - s.params.damping * s.velocity) / s.params.mass;
            s.velocity += accel * h;
            s.value += s.velocity * h;

            if !s.value.is_finite() || !s.velocity.is_finite() {
                tracing::warn!(goal = s.target, "spring diverged, snapping to target");
                settled = true;
                break;
            }

            let crossed = (s.value - s.target) * s.origin_side < 0.0;
            let at_rest =
                (s.value - s.target).abs() < s.params.rest_displacement && s.velocity.abs() < s.params.rest_speed;
            settled = at_rest || (s.params.overshoot_clamping && crossed);
        }

        if settled {
            tracing::trace!(goal = s.target, "spring settled");
            self.state = None;
            return Some(Sample { value: s.target, settled: true });
        }

        self.state = Some(s);
        Some(Sample { value: s.value, settled: false })
    }

    fn is_running(&self) -> bool {
        self.state.is_some()
    }

    fn target(&self) -> Option<f64> {
        self.state.map(|s| s.target)
    }
}
