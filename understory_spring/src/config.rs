// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Tuning for a [`Spring`](crate::Spring).
///
/// The defaults (`tension: 300`, `friction: 30`) give a quick approach with a
/// barely visible overshoot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Pull toward the target per unit of distance.
    pub tension: f64,
    /// Damping per unit of velocity.
    pub friction: f64,
    /// Distance and speed under which the spring counts as settled.
    pub rest_threshold: f64,
}

impl SpringConfig {
    /// The default spring.
    pub const DEFAULT: Self = Self {
        tension: 300.0,
        friction: 30.0,
        rest_threshold: 0.1,
    };

    /// Creates a config with the given tension and friction and the default
    /// rest threshold.
    #[must_use]
    pub const fn new(tension: f64, friction: f64) -> Self {
        Self {
            tension,
            friction,
            rest_threshold: Self::DEFAULT.rest_threshold,
        }
    }

    /// Returns `true` if a step of `dt` seconds keeps the integration from
    /// diverging.
    ///
    /// Semi-implicit Euler on this spring is stable while
    /// `4 - 2 * friction * dt - tension * dt^2 > 0`.
    #[must_use]
    pub fn is_stable_at(&self, dt: f64) -> bool {
        4.0 - 2.0 * self.friction * dt - self.tension * dt * dt > 0.0
    }

    /// Checks that every field is a positive, finite number and that the
    /// spring integrates stably at [`Spring::MAX_STEP`](crate::Spring::MAX_STEP).
    pub fn validate(&self) -> Result<(), SpringConfigError> {
        fn positive(v: f64) -> bool {
            v.is_finite() && v > 0.0
        }
        if !positive(self.tension) {
            return Err(SpringConfigError::Tension(self.tension));
        }
        if !positive(self.friction) {
            return Err(SpringConfigError::Friction(self.friction));
        }
        if !positive(self.rest_threshold) {
            return Err(SpringConfigError::RestThreshold(self.rest_threshold));
        }
        if !self.is_stable_at(crate::Spring::MAX_STEP) {
            return Err(SpringConfigError::Unstable {
                tension: self.tension,
                friction: self.friction,
            });
        }
        Ok(())
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Reasons a [`SpringConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpringConfigError {
    /// `tension` is not positive and finite.
    Tension(f64),
    /// `friction` is not positive and finite.
    Friction(f64),
    /// `rest_threshold` is not positive and finite.
    RestThreshold(f64),
    /// The spring is too stiff to integrate at [`Spring::MAX_STEP`](crate::Spring::MAX_STEP).
    Unstable {
        /// Configured tension.
        tension: f64,
        /// Configured friction.
        friction: f64,
    },
}

impl fmt::Display for SpringConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (field, value) = match self {
            Self::Tension(v) => ("tension", v),
            Self::Friction(v) => ("friction", v),
            Self::RestThreshold(v) => ("rest_threshold", v),
            Self::Unstable { tension, friction } => {
                return write!(
                    f,
                    "spring with tension {tension} and friction {friction} diverges at a 1/60 s step"
                );
            }
        };
        write!(f, "spring {field} must be positive and finite, got {value}")
    }
}

impl core::error::Error for SpringConfigError {}

#[cfg(test)]
mod tests {
    use super::{SpringConfig, SpringConfigError};

    #[test]
    fn default_is_valid() {
        assert_eq!(SpringConfig::default().validate(), Ok(()));
        assert_eq!(SpringConfig::new(120.0, 14.0).rest_threshold, 0.1);
    }

    #[test]
    fn rejects_non_positive_and_non_finite_fields() {
        assert_eq!(
            SpringConfig::new(0.0, 30.0).validate(),
            Err(SpringConfigError::Tension(0.0))
        );
        assert_eq!(
            SpringConfig::new(300.0, -1.0).validate(),
            Err(SpringConfigError::Friction(-1.0))
        );
        let config = SpringConfig {
            rest_threshold: f64::INFINITY,
            ..SpringConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SpringConfigError::RestThreshold(f64::INFINITY))
        );
        assert!(matches!(
            SpringConfig::new(f64::NAN, 30.0).validate(),
            Err(SpringConfigError::Tension(_))
        ));
    }

    #[test]
    fn stability_limit() {
        let config = SpringConfig::default();
        assert!(config.is_stable_at(0.050));
        assert!(!config.is_stable_at(0.055));
        assert!(!config.is_stable_at(0.064));

        assert_eq!(
            SpringConfig::new(300.0, 150.0).validate(),
            Err(SpringConfigError::Unstable {
                tension: 300.0,
                friction: 150.0,
            })
        );
        assert_eq!(SpringConfig::new(2_000.0, 60.0).validate(), Ok(()));
    }
}
