// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: turn raw pointer coordinates into a live sheet position.
//!
//! ## Usage
//!
//! 1) Start a session with [`GestureTracker::begin_drag`], passing the pointer
//!    coordinate and the sheet's current position.
//! 2) On each move, call [`GestureTracker::update_drag`] to get the new live
//!    position. Pointer travel is converted to a percentage of the viewport
//!    extent and added to the position the drag started from.
//! 3) Finish with [`GestureTracker::end_drag`], which hands back the last live
//!    position, or [`GestureTracker::cancel_drag`] to drop the session.
//!
//! ## Minimal example
//!
//! ```
//! use understory_sheet::gesture::GestureTracker;
//!
//! // 800 pointer units tall, positions between 10 and 100.
//! let mut tracker = GestureTracker::new(800.0, 10.0..=100.0);
//!
//! assert!(tracker.begin_drag(200.0, 50.0));
//!
//! // 80 units down is 10% of the viewport.
//! assert_eq!(tracker.update_drag(280.0), Some(60.0));
//!
//! // Dragging far past the bottom clamps at the most hidden position.
//! assert_eq!(tracker.update_drag(5_000.0), Some(100.0));
//!
//! assert_eq!(tracker.end_drag(), Some(100.0));
//! assert!(!tracker.is_dragging());
//! ```

use core::ops::RangeInclusive;

/// State of one drag, from pointer-down to pointer-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer coordinate at pointer-down.
    pub origin_coord: f64,
    /// Sheet position at pointer-down.
    pub origin_value: f64,
    /// Latest position computed from pointer input.
    pub live_value: f64,
}

/// Tracks at most one [`DragSession`] at a time.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    viewport_extent: f64,
    min: f64,
    max: f64,
    session: Option<DragSession>,
    last_value: Option<f64>,
}

impl GestureTracker {
    /// Creates an idle tracker.
    ///
    /// `viewport_extent` is the pointer distance that corresponds to 100% of
    /// travel; `bounds` is the range live positions are clamped into.
    #[must_use]
    pub fn new(viewport_extent: f64, bounds: RangeInclusive<f64>) -> Self {
        let (a, b) = bounds.into_inner();
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        Self {
            viewport_extent,
            min,
            max,
            session: None,
            last_value: None,
        }
    }

    /// Pointer distance that corresponds to 100% of travel.
    #[must_use]
    pub fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    /// Updates the viewport extent, e.g. after a window resize.
    ///
    /// Values that are not positive and finite are ignored. An active session
    /// keeps its origin; only later moves use the new extent.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        if extent.is_finite() && extent > 0.0 {
            self.viewport_extent = extent;
        }
    }

    /// Returns `true` while a session is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// The most recent live value, from the active or the last finished
    /// session.
    #[must_use]
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// Opens a session at `coord`, starting from `current_value`.
    ///
    /// Returns `false` and leaves the existing session untouched if one is
    /// already active.
    pub fn begin_drag(&mut self, coord: f64, current_value: f64) -> bool {
        if self.session.is_some() {
            return false;
        }
        let origin_value = current_value.clamp(self.min, self.max);
        self.session = Some(DragSession {
            origin_coord: coord,
            origin_value,
            live_value: origin_value,
        });
        self.last_value = Some(origin_value);
        true
    }

    /// Moves the pointer to `coord` and returns the new live value.
    ///
    /// Without a session this changes nothing and returns the last known
    /// value, which is `None` only if no drag has happened yet.
    pub fn update_drag(&mut self, coord: f64) -> Option<f64> {
        let extent = self.viewport_extent;
        let (min, max) = (self.min, self.max);
        let Some(session) = self.session.as_mut() else {
            return self.last_value;
        };
        let delta_percent = (coord - session.origin_coord) / extent * 100.0;
        let live = session.origin_value + delta_percent;
        // NaN input keeps the previous value.
        if !live.is_nan() {
            session.live_value = live.clamp(min, max);
        }
        self.last_value = Some(session.live_value);
        Some(session.live_value)
    }

    /// Closes the session and returns its last live value.
    ///
    /// Returns `None` if no session was active.
    pub fn end_drag(&mut self) -> Option<f64> {
        self.session.take().map(|s| s.live_value)
    }

    /// Drops the session without producing a value.
    pub fn cancel_drag(&mut self) {
        self.session = None;
    }
}
