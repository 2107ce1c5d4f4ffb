// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_spring --heading-base-level=0

//! Understory Spring: a retargetable scalar spring for UI motion.
//!
//! [`Spring`] produces one scalar position per tick, converging toward a
//! target. It is intentionally not a physically exact simulation: there is no
//! mass and no units, only a tension/friction pair that gives a smooth,
//! nearly critically damped approach.
//!
//! The spring is driven externally. Callers own the clock and pass the
//! measured frame delta to [`Spring::advance`] (or a single integration step
//! to [`Spring::tick`]); the spring never schedules work on its own. Use
//! [`Spring::is_settled`] to decide whether another frame is needed.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_spring::{Spring, SpringConfig};
//!
//! let mut spring = Spring::new(SpringConfig::default(), 100.0).with_bounds(10.0..=100.0);
//! spring.set_target(50.0);
//!
//! while !spring.is_settled() {
//!     spring.tick(1.0 / 60.0);
//! }
//! assert_eq!(spring.value(), 50.0);
//! assert_eq!(spring.velocity(), 0.0);
//! ```
//!
//! ## Retargeting
//!
//! [`Spring::set_target`] changes the destination without touching the
//! current velocity, so a spring that is halfway to one target bends smoothly
//! toward the next one. [`Spring::jump_to`] is the opposite: it moves the
//! value directly and discards velocity, which is what direct manipulation
//! (dragging) wants.
//!
//! This crate is `no_std`.

#![no_std]

mod config;

pub use config::{SpringConfig, SpringConfigError};

use core::ops::RangeInclusive;

/// Snapshot of a [`Spring`]'s integration state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationState {
    /// Current position.
    pub value: f64,
    /// Current velocity in position units per second.
    pub velocity: f64,
    /// Position the spring is converging toward.
    pub target: f64,
}

/// A damped spring over a single scalar.
///
/// `value` and `target` are always kept within the spring's bounds (unbounded
/// by default).
#[derive(Clone, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    min: f64,
    max: f64,
}

impl Spring {
    /// Longest step [`Spring::advance`] integrates at once, in seconds.
    ///
    /// Explicit integration of a stiff spring diverges when the step is too
    /// long; [`SpringConfig::validate`] rejects configs that are unstable at
    /// this step.
    pub const MAX_STEP: f64 = 1.0 / 60.0;

    /// Creates a spring resting at `value`, with `target == value`.
    #[must_use]
    pub fn new(config: SpringConfig, value: f64) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
            min: f64::NEG_INFINITY,
            max: f64::INFINITY,
        }
    }

    /// Builder form of [`Spring::set_bounds`].
    #[must_use]
    pub fn with_bounds(mut self, bounds: RangeInclusive<f64>) -> Self {
        self.set_bounds(bounds);
        self
    }

    /// Sets the inclusive range `value` and `target` are clamped into.
    ///
    /// The range is normalized so that `min <= max`. Ranges with a NaN
    /// endpoint are ignored.
    pub fn set_bounds(&mut self, bounds: RangeInclusive<f64>) {
        let (a, b) = bounds.into_inner();
        if a.is_nan() || b.is_nan() {
            return;
        }
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        self.min = min;
        self.max = max;
        self.value = self.clamp(self.value);
        self.target = self.clamp(self.target);
    }

    /// Returns the clamp range.
    #[must_use]
    pub fn bounds(&self) -> RangeInclusive<f64> {
        self.min..=self.max
    }

    /// Returns the configuration this spring was built with.
    #[must_use]
    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Current position.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity in position units per second.
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Snapshot of the integration state for debugging and inspection.
    #[must_use]
    pub fn state(&self) -> AnimationState {
        AnimationState {
            value: self.value,
            velocity: self.velocity,
            target: self.target,
        }
    }

    /// Retargets the spring, keeping the current velocity.
    ///
    /// The target is clamped into bounds. Setting the same target again has
    /// no effect on the trajectory. NaN targets are ignored.
    pub fn set_target(&mut self, target: f64) {
        if target.is_nan() {
            return;
        }
        self.target = self.clamp(target);
    }

    /// Moves the value directly and drops all velocity.
    ///
    /// The target is left alone; call [`Spring::set_target`] to choose where
    /// the spring should go once it is ticked again.
    pub fn jump_to(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.value = self.clamp(value);
        self.velocity = 0.0;
    }

    /// Pins the value to the target and zeroes velocity.
    pub fn settle(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    /// Returns `true` when both the distance to the target and the velocity
    /// are under the rest threshold.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        let threshold = self.config.rest_threshold;
        (self.target - self.value).abs() < threshold && self.velocity.abs() < threshold
    }

    /// Advances the simulation by `dt` seconds and returns the new value.
    ///
    /// Uses semi-implicit Euler:
    ///
    /// ```text
    /// accel     = tension * (target - value) - friction * velocity
    /// velocity += accel * dt
    /// value    += velocity * dt
    /// ```
    ///
    /// When the result is within the rest threshold the value is pinned to
    /// the target and velocity is zeroed, so repeated ticks converge exactly.
    /// A `dt` that is not a positive finite number leaves the state untouched.
    pub fn tick(&mut self, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0) {
            return self.value;
        }

        let accel =
            self.config.tension * (self.target - self.value) - self.config.friction * self.velocity;
        self.velocity += accel * dt;
        self.value += self.velocity * dt;

        // Overshooting a bound stops motion in that direction.
        if self.value < self.min {
            self.value = self.min;
            self.velocity = self.velocity.max(0.0);
        } else if self.value > self.max {
            self.value = self.max;
            self.velocity = self.velocity.min(0.0);
        }

        if self.is_settled() {
            log::trace!("spring settled at {}", self.target);
            self.settle();
        }
        self.value
    }

    /// Advances the simulation by `dt` seconds in steps of at most
    /// [`Spring::MAX_STEP`] and returns the new value.
    ///
    /// Stops early once the spring settles. Callers should cap `dt` so a long
    /// stall does not turn into a long burst of steps.
    pub fn advance(&mut self, dt: f64) -> f64 {
        if !(dt.is_finite() && dt > 0.0) {
            return self.value;
        }
        let mut remaining = dt;
        while remaining > 0.0 && !self.is_settled() {
            let step = remaining.min(Self::MAX_STEP);
            self.tick(step);
            remaining -= step;
        }
        if self.is_settled() && self.value != self.target {
            self.settle();
        }
        self.value
    }

    fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min, self.max)
    }
}
