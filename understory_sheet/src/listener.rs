// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notifications from a sheet to the host.

/// Receives sheet notifications. Every method defaults to doing nothing.
pub trait SheetListener<K> {
    /// The sheet position changed, either from a spring frame or a drag move.
    fn position_changed(&mut self, value: f64) {
        let _ = value;
    }

    /// The current snap point changed.
    fn snap_point_changed(&mut self, point: K) {
        let _ = point;
    }

    /// The sheet went from open to closed.
    fn closed(&mut self) {}
}

/// Identifies a listener registered with
/// [`SheetController::subscribe`](crate::SheetController::subscribe).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

pub(crate) struct OnPositionChange<F>(pub(crate) F);

impl<K, F: FnMut(f64)> SheetListener<K> for OnPositionChange<F> {
    fn position_changed(&mut self, value: f64) {
        (self.0)(value);
    }
}

pub(crate) struct OnSnapPointChange<F>(pub(crate) F);

impl<K, F: FnMut(K)> SheetListener<K> for OnSnapPointChange<F> {
    fn snap_point_changed(&mut self, point: K) {
        (self.0)(point);
    }
}

pub(crate) struct OnClose<F>(pub(crate) F);

impl<K, F: FnMut()> SheetListener<K> for OnClose<F> {
    fn closed(&mut self) {
        (self.0)();
    }
}
