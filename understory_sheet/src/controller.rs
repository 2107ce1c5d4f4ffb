// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use kurbo::{Size, Vec2};
use ui_events::keyboard::{Key, NamedKey};
use understory_spring::Spring;

use crate::config::{SheetConfig, SheetConfigError, SnapRole};
use crate::gesture::GestureTracker;
use crate::host::{FrameHandle, PointerCapture, SheetHost};
use crate::listener::{OnClose, OnPositionChange, OnSnapPointChange, SheetListener, Subscription};
use crate::snap::SnapPoints;

/// Time integrated by the first frame of a run, before there is a previous
/// frame to measure from.
const FIRST_FRAME: Duration = Duration::from_micros(16_667);

/// How the host should present the backdrop behind the sheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Backdrop {
    /// Sheet is closed; no backdrop.
    Hidden,
    /// Sheet is open but not expanded; backdrop is transparent and ignores
    /// presses.
    Passive,
    /// Sheet is expanded; backdrop is visible and a press closes the sheet.
    Interactive,
}

/// Snapshot of the discrete sheet state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SheetState<K> {
    /// The snap point the sheet rests at or is moving toward.
    pub current_snap_point: K,
    /// `true` unless `current_snap_point` is the closed snap point.
    pub is_open: bool,
}

/// Drives a sheet between snap points.
///
/// Programmatic requests retarget a [`Spring`] that runs one host frame at a
/// time until it settles. Pointer input takes over the position directly for
/// the length of a drag and hands it back to the spring, aimed at the nearest
/// snap point, on release.
///
/// Dropping the controller cancels any pending frame, releases pointer
/// capture and unlocks background scrolling.
pub struct SheetController<K, H: SheetHost> {
    snap_points: SnapPoints<K>,
    closed: K,
    expanded: K,
    current: K,
    spring: Spring,
    gesture: GestureTracker,
    host: H,
    frame: Option<FrameHandle>,
    last_frame: Option<Duration>,
    max_frame_delta: Duration,
    capture: Option<PointerCapture>,
    scroll_suppressed: bool,
    listeners: Vec<(Subscription, Box<dyn SheetListener<K>>)>,
    next_subscription: u64,
}

impl<K, H> SheetController<K, H>
where
    K: Copy + PartialEq + fmt::Debug + 'static,
    H: SheetHost,
{
    /// Builds a controller resting at `config.initial`.
    ///
    /// This is the only fallible operation; see [`SheetConfig::validate`].
    pub fn new(config: SheetConfig<K>, host: H) -> Result<Self, SheetConfigError> {
        config.validate()?;
        let bounds = config.snap_points.min_position()..=config.snap_points.max_position();
        let start = config
            .snap_points
            .position_of(config.initial)
            .ok_or(SheetConfigError::UnknownSnapPoint(SnapRole::Initial))?;

        let mut controller = Self {
            spring: Spring::new(config.spring, start).with_bounds(bounds.clone()),
            gesture: GestureTracker::new(config.viewport_extent, bounds),
            snap_points: config.snap_points,
            closed: config.closed,
            expanded: config.expanded,
            current: config.initial,
            host,
            frame: None,
            last_frame: None,
            max_frame_delta: config.max_frame_delta,
            capture: None,
            scroll_suppressed: false,
            listeners: Vec::new(),
            next_subscription: 0,
        };
        controller.sync_scroll_lock();
        Ok(controller)
    }

    /// Registers a listener.
    pub fn subscribe(&mut self, listener: Box<dyn SheetListener<K>>) -> Subscription {
        self.next_subscription += 1;
        let id = Subscription(self.next_subscription);
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(id, _)| *id != subscription);
        self.listeners.len() != before
    }

    /// Calls `f` with every new position.
    pub fn on_position_change(&mut self, f: impl FnMut(f64) + 'static) -> Subscription {
        self.subscribe(Box::new(OnPositionChange(f)))
    }

    /// Calls `f` whenever the current snap point changes.
    pub fn on_snap_point_change(&mut self, f: impl FnMut(K) + 'static) -> Subscription {
        self.subscribe(Box::new(OnSnapPointChange(f)))
    }

    /// Calls `f` whenever the sheet goes from open to closed.
    pub fn on_close(&mut self, f: impl FnMut() + 'static) -> Subscription {
        self.subscribe(Box::new(OnClose(f)))
    }

    /// Moves to `point`. Same as [`SheetController::set_snap_point`].
    pub fn open(&mut self, point: K) {
        self.set_snap_point(point);
    }

    /// Moves to the closed snap point.
    pub fn close(&mut self) {
        self.set_snap_point(self.closed);
    }

    /// Makes `point` the current snap point and animates toward it.
    ///
    /// Ids outside the snap point set are ignored, and requesting the current
    /// snap point does nothing. During a drag the pointer keeps control: the
    /// snap point changes right away, but the release still picks the snap
    /// point nearest to where the pointer lets go.
    pub fn set_snap_point(&mut self, point: K) {
        if !self.snap_points.contains(point) {
            log::debug!("ignoring unknown snap point {point:?}");
            return;
        }
        self.apply_snap_point(point);
    }

    /// Starts a drag at `coord`. Ignored while a drag is already active.
    ///
    /// The spring stops where it is and drops its velocity; from here on the
    /// pointer alone decides the position.
    pub fn feed_pointer_down(&mut self, coord: f64) {
        let value = self.spring.value();
        if !self.gesture.begin_drag(coord, value) {
            return;
        }
        log::debug!("drag started at {coord} from {value}");
        self.disarm();
        self.spring.jump_to(value);
        self.capture = Some(self.host.capture_pointer());
    }

    /// Moves an active drag to `coord`. Ignored without a drag.
    pub fn feed_pointer_move(&mut self, coord: f64) {
        if !self.gesture.is_dragging() {
            return;
        }
        let Some(live) = self.gesture.update_drag(coord) else {
            return;
        };
        if live != self.spring.value() {
            self.spring.jump_to(live);
            self.emit_position(live);
        }
    }

    /// Ends an active drag and settles at the snap point nearest to where the
    /// pointer let go. Ignored without a drag.
    pub fn feed_pointer_up(&mut self) {
        let Some(live) = self.gesture.end_drag() else {
            return;
        };
        self.release_capture();
        self.spring.jump_to(live);
        let point = self.snap_points.resolve(live);
        log::debug!("drag released at {live}, snapping to {point:?}");
        self.apply_snap_point(point);
    }

    /// The host lost pointer capture mid-drag; treated like a release.
    pub fn feed_pointer_cancel(&mut self) {
        self.feed_pointer_up();
    }

    /// Handles a key press. Escape closes an open sheet, ending any drag;
    /// other keys are ignored.
    pub fn feed_key(&mut self, key: &Key) {
        if *key != Key::Named(NamedKey::Escape) || !self.is_open() {
            return;
        }
        log::debug!("escape pressed, closing");
        if self.gesture.is_dragging() {
            self.cancel_drag();
        }
        self.close();
    }

    /// Handles a press on the backdrop. Closes the sheet only while the
    /// backdrop is [`Backdrop::Interactive`].
    pub fn feed_backdrop_press(&mut self) {
        if self.backdrop() == Backdrop::Interactive {
            self.close();
        }
    }

    /// Advances the spring for a frame scheduled through
    /// [`SheetHost::request_frame`].
    ///
    /// `timestamp` is the frame time on any monotonic clock. The first frame
    /// after the sheet starts moving integrates one nominal 60 Hz frame;
    /// later frames integrate the time since the previous one, capped at
    /// [`SheetConfig::max_frame_delta`]. Calls while no frame is pending are
    /// ignored.
    pub fn on_frame(&mut self, timestamp: Duration) {
        if self.frame.take().is_none() {
            return;
        }

        let dt = match self.last_frame {
            Some(prev) => timestamp.saturating_sub(prev),
            None => FIRST_FRAME,
        }
        .min(self.max_frame_delta);
        self.last_frame = Some(timestamp);

        let before = self.spring.value();
        let value = self.spring.advance(dt.as_secs_f64());
        if value != before {
            self.emit_position(value);
        }

        if self.spring.is_settled() {
            let target = self.spring.target();
            if self.spring.value() != target {
                self.spring.settle();
                self.emit_position(target);
            }
            log::trace!("sheet settled at {target}");
            self.last_frame = None;
        } else {
            self.frame = Some(self.host.request_frame());
        }
    }

    /// Updates the pointer distance that corresponds to 100% of travel.
    pub fn set_viewport_extent(&mut self, extent: f64) {
        self.gesture.set_viewport_extent(extent);
    }

    /// The snap point the sheet rests at or is moving toward.
    #[must_use]
    pub fn current_snap_point(&self) -> K {
        self.current
    }

    /// Snapshot of the discrete state.
    #[must_use]
    pub fn state(&self) -> SheetState<K> {
        SheetState {
            current_snap_point: self.current,
            is_open: self.is_open(),
        }
    }

    /// `true` unless the current snap point is the closed one.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.current != self.closed
    }

    /// `true` while the current snap point is the expanded one.
    ///
    /// The host should lock background scrolling while this holds.
    #[must_use]
    pub fn should_suppress_scroll(&self) -> bool {
        self.current == self.expanded
    }

    /// How the backdrop should be presented.
    #[must_use]
    pub fn backdrop(&self) -> Backdrop {
        if !self.is_open() {
            Backdrop::Hidden
        } else if self.current == self.expanded {
            Backdrop::Interactive
        } else {
            Backdrop::Passive
        }
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> f64 {
        self.spring.value()
    }

    /// Offset to translate a sheet of size `sheet` by, treating the position
    /// as a percentage of its height.
    #[must_use]
    pub fn translation(&self, sheet: Size) -> Vec2 {
        Vec2::new(0.0, self.spring.value() / 100.0 * sheet.height)
    }

    /// `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// `true` while a frame is pending, i.e. the spring is moving.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.frame.is_some()
    }

    /// The underlying spring.
    #[must_use]
    pub fn spring(&self) -> &Spring {
        &self.spring
    }

    /// The underlying drag tracker.
    #[must_use]
    pub fn gesture(&self) -> &GestureTracker {
        &self.gesture
    }

    /// The snap point set.
    #[must_use]
    pub fn snap_points(&self) -> &SnapPoints<K> {
        &self.snap_points
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The host, mutably.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn apply_snap_point(&mut self, point: K) {
        let Some(position) = self.snap_points.position_of(point) else {
            return;
        };
        let was_open = self.is_open();
        let changed = point != self.current;

        self.current = point;
        self.spring.set_target(position);
        self.ensure_animating();

        if changed {
            log::debug!("snap point changed to {point:?}");
            self.sync_scroll_lock();
            for (_, listener) in &mut self.listeners {
                listener.snap_point_changed(point);
            }
            if was_open && !self.is_open() {
                for (_, listener) in &mut self.listeners {
                    listener.closed();
                }
            }
        }
    }

    fn ensure_animating(&mut self) {
        if self.gesture.is_dragging() {
            return;
        }
        if self.spring.is_settled() {
            self.disarm();
            let target = self.spring.target();
            if self.spring.value() != target {
                self.spring.settle();
                self.emit_position(target);
            }
        } else if self.frame.is_none() {
            log::trace!("arming frame toward {}", self.spring.target());
            self.last_frame = None;
            self.frame = Some(self.host.request_frame());
        }
    }

    fn cancel_drag(&mut self) {
        log::debug!("cancelling drag at {}", self.spring.value());
        self.gesture.cancel_drag();
        self.release_capture();
    }

    fn sync_scroll_lock(&mut self) {
        let suppress = self.should_suppress_scroll();
        if suppress != self.scroll_suppressed {
            self.scroll_suppressed = suppress;
            self.host.set_scroll_suppressed(suppress);
        }
    }

    fn emit_position(&mut self, value: f64) {
        for (_, listener) in &mut self.listeners {
            listener.position_changed(value);
        }
    }
}

impl<K, H: SheetHost> SheetController<K, H> {
    /// Cancels the pending frame, ends any drag and unlocks scrolling.
    ///
    /// Called on drop. Safe to call repeatedly; a later request starts
    /// animating again.
    pub fn teardown(&mut self) {
        log::debug!("tearing down sheet");
        self.disarm();
        self.gesture.cancel_drag();
        self.release_capture();
        if self.scroll_suppressed {
            self.scroll_suppressed = false;
            self.host.set_scroll_suppressed(false);
        }
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.frame.take() {
            log::trace!("cancelling frame {handle:?}");
            self.host.cancel_frame(handle);
        }
        self.last_frame = None;
    }

    fn release_capture(&mut self) {
        if let Some(capture) = self.capture.take() {
            self.host.release_pointer(capture);
        }
    }
}

impl<K, H: SheetHost> Drop for SheetController<K, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<K: fmt::Debug, H: SheetHost + fmt::Debug> fmt::Debug for SheetController<K, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SheetController")
            .field("snap_points", &self.snap_points)
            .field("closed", &self.closed)
            .field("expanded", &self.expanded)
            .field("current", &self.current)
            .field("spring", &self.spring)
            .field("gesture", &self.gesture)
            .field("host", &self.host)
            .field("frame", &self.frame)
            .field("capture", &self.capture)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NoopHost;
    use crate::snap::{SnapEntry, SnapPoint};

    #[test]
    fn only_escape_closes() {
        let config = SheetConfig::standard().with_initial(SnapPoint::Half);
        let mut sheet = SheetController::new(config, NoopHost::default()).unwrap();
        sheet.feed_key(&Key::Named(NamedKey::Enter));
        sheet.feed_key(&Key::Character("q".into()));
        assert!(sheet.is_open());
        sheet.feed_key(&Key::Named(NamedKey::Escape));
        assert!(!sheet.is_open());
    }

    #[test]
    fn starts_at_initial_position_at_rest() {
        let config = SheetConfig::standard().with_initial(SnapPoint::Half);
        let sheet = SheetController::new(config, NoopHost::default()).unwrap();
        assert_eq!(sheet.position(), 50.0);
        assert!(!sheet.is_animating());
        assert!(sheet.is_open());
        assert_eq!(
            sheet.state(),
            SheetState {
                current_snap_point: SnapPoint::Half,
                is_open: true,
            }
        );
        assert_eq!(sheet.spring().bounds(), 10.0..=100.0);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = SheetConfig::standard().with_viewport_extent(0.0);
        assert_eq!(
            SheetController::new(config, NoopHost::default()).unwrap_err(),
            SheetConfigError::ViewportExtent(0.0)
        );
    }

    #[test]
    fn backdrop_follows_snap_point() {
        let mut sheet = SheetController::new(SheetConfig::standard(), NoopHost::default()).unwrap();
        assert_eq!(sheet.backdrop(), Backdrop::Hidden);

        sheet.open(SnapPoint::Half);
        assert_eq!(sheet.backdrop(), Backdrop::Passive);
        sheet.feed_backdrop_press();
        assert_eq!(sheet.current_snap_point(), SnapPoint::Half);

        sheet.open(SnapPoint::Full);
        assert_eq!(sheet.backdrop(), Backdrop::Interactive);
        sheet.feed_backdrop_press();
        assert_eq!(sheet.current_snap_point(), SnapPoint::Closed);
        assert_eq!(sheet.backdrop(), Backdrop::Hidden);
    }

    #[test]
    fn translation_scales_with_sheet_height() {
        let config = SheetConfig::standard().with_initial(SnapPoint::Half);
        let sheet = SheetController::new(config, NoopHost::default()).unwrap();
        assert_eq!(
            sheet.translation(Size::new(400.0, 900.0)),
            Vec2::new(0.0, 450.0)
        );
    }

    #[test]
    fn unknown_snap_point_is_ignored() {
        let points = SnapPoints::new([
            SnapEntry::new(SnapPoint::Closed, 100.0),
            SnapEntry::new(SnapPoint::Full, 10.0),
        ])
        .unwrap();
        let config = SheetConfig::new(points, SnapPoint::Closed, SnapPoint::Closed, SnapPoint::Full);
        let mut sheet = SheetController::new(config, NoopHost::default()).unwrap();
        sheet.open(SnapPoint::Half);
        assert_eq!(sheet.current_snap_point(), SnapPoint::Closed);
        assert!(!sheet.is_animating());
    }

    #[test]
    fn unsubscribe_reports_membership() {
        let mut sheet = SheetController::new(SheetConfig::standard(), NoopHost::default()).unwrap();
        let sub = sheet.on_close(|| {});
        assert!(sheet.unsubscribe(sub));
        assert!(!sheet.unsubscribe(sub));
    }
}
