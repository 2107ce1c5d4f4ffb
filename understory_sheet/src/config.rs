// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;
use core::time::Duration;

use understory_spring::{SpringConfig, SpringConfigError};

use crate::snap::{SnapPoint, SnapPoints, SnapPointsError};

/// Everything a [`SheetController`](crate::SheetController) is built from.
#[derive(Clone, Debug)]
pub struct SheetConfig<K> {
    /// Resting positions, in tie-break order.
    pub snap_points: SnapPoints<K>,
    /// Snap point the sheet starts at.
    pub initial: K,
    /// Snap point at which the sheet counts as closed.
    pub closed: K,
    /// Snap point at which background scrolling is suppressed and the
    /// backdrop accepts presses.
    pub expanded: K,
    /// Spring used for programmatic moves and release settling.
    pub spring: SpringConfig,
    /// Pointer distance that corresponds to 100% of travel.
    pub viewport_extent: f64,
    /// Upper bound on the time integrated per frame.
    ///
    /// Longer gaps between frames (a stalled or backgrounded host) are
    /// integrated as this much time. Each frame's time is integrated in steps
    /// of at most [`Spring::MAX_STEP`](understory_spring::Spring::MAX_STEP).
    pub max_frame_delta: Duration,
}

impl<K: Copy + PartialEq> SheetConfig<K> {
    /// Creates a config with the default spring, a viewport extent of 1000
    /// and a 64 ms frame delta cap.
    #[must_use]
    pub fn new(snap_points: SnapPoints<K>, initial: K, closed: K, expanded: K) -> Self {
        Self {
            snap_points,
            initial,
            closed,
            expanded,
            spring: SpringConfig::DEFAULT,
            viewport_extent: 1000.0,
            max_frame_delta: Duration::from_millis(64),
        }
    }

    /// Sets the starting snap point.
    #[must_use]
    pub fn with_initial(mut self, initial: K) -> Self {
        self.initial = initial;
        self
    }

    /// Sets the spring.
    #[must_use]
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    /// Sets the pointer distance for 100% of travel.
    #[must_use]
    pub fn with_viewport_extent(mut self, extent: f64) -> Self {
        self.viewport_extent = extent;
        self
    }

    /// Sets the per-frame time step cap.
    #[must_use]
    pub fn with_max_frame_delta(mut self, delta: Duration) -> Self {
        self.max_frame_delta = delta;
        self
    }

    /// Checks the config for values a controller cannot work with.
    pub fn validate(&self) -> Result<(), SheetConfigError> {
        self.spring.validate()?;
        for (role, id) in [
            (SnapRole::Initial, self.initial),
            (SnapRole::Closed, self.closed),
            (SnapRole::Expanded, self.expanded),
        ] {
            if !self.snap_points.contains(id) {
                return Err(SheetConfigError::UnknownSnapPoint(role));
            }
        }
        if !(self.viewport_extent.is_finite() && self.viewport_extent > 0.0) {
            return Err(SheetConfigError::ViewportExtent(self.viewport_extent));
        }
        if self.max_frame_delta.is_zero() {
            return Err(SheetConfigError::ZeroFrameDelta);
        }
        Ok(())
    }
}

impl SheetConfig<SnapPoint> {
    /// The three standard snap points, starting closed.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            SnapPoints::standard(),
            SnapPoint::Closed,
            SnapPoint::Closed,
            SnapPoint::Full,
        )
    }
}

impl Default for SheetConfig<SnapPoint> {
    fn default() -> Self {
        Self::standard()
    }
}

/// Which configured snap point a [`SheetConfigError::UnknownSnapPoint`]
/// refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SnapRole {
    /// [`SheetConfig::initial`].
    Initial,
    /// [`SheetConfig::closed`].
    Closed,
    /// [`SheetConfig::expanded`].
    Expanded,
}

/// Reasons a [`SheetConfig`] is rejected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SheetConfigError {
    /// The spring config is invalid.
    Spring(SpringConfigError),
    /// The snap point list is invalid.
    SnapPoints(SnapPointsError),
    /// A configured snap point id is not in the snap point set.
    UnknownSnapPoint(SnapRole),
    /// The viewport extent is not positive and finite.
    ViewportExtent(f64),
    /// The frame delta cap is zero.
    ZeroFrameDelta,
}

impl fmt::Display for SheetConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spring(e) => write!(f, "invalid spring: {e}"),
            Self::SnapPoints(e) => write!(f, "invalid snap points: {e}"),
            Self::UnknownSnapPoint(role) => {
                write!(f, "{role:?} snap point is not in the snap point set")
            }
            Self::ViewportExtent(v) => {
                write!(f, "viewport extent must be positive and finite, got {v}")
            }
            Self::ZeroFrameDelta => f.write_str("max frame delta must be non-zero"),
        }
    }
}

impl core::error::Error for SheetConfigError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Spring(e) => Some(e),
            Self::SnapPoints(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpringConfigError> for SheetConfigError {
    fn from(e: SpringConfigError) -> Self {
        Self::Spring(e)
    }
}

impl From<SnapPointsError> for SheetConfigError {
    fn from(e: SnapPointsError) -> Self {
        Self::SnapPoints(e)
    }
}
