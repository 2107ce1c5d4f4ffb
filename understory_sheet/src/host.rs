// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The seam between a [`SheetController`](crate::SheetController) and the
//! embedding UI runtime.
//!
//! The controller never owns a clock or an event loop. It asks the host for a
//! single "next frame" callback while the spring is moving, and for global
//! pointer capture while a drag is active. The host answers with opaque
//! handles and hands them back when asked to cancel or release.

/// Handle for a pending frame callback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Handle for an active global pointer capture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PointerCapture(pub u64);

/// Services a sheet needs from the runtime it is embedded in.
pub trait SheetHost {
    /// Schedules one call to
    /// [`SheetController::on_frame`](crate::SheetController::on_frame) at the
    /// next display frame.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a callback scheduled by [`SheetHost::request_frame`].
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Starts routing pointer move/up events globally to the sheet.
    fn capture_pointer(&mut self) -> PointerCapture;

    /// Stops routing started by [`SheetHost::capture_pointer`].
    fn release_pointer(&mut self, capture: PointerCapture);

    /// Called whenever background scrolling should be locked or unlocked.
    fn set_scroll_suppressed(&mut self, suppressed: bool) {
        let _ = suppressed;
    }
}

impl<H: SheetHost + ?Sized> SheetHost for &mut H {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle);
    }

    fn capture_pointer(&mut self) -> PointerCapture {
        (**self).capture_pointer()
    }

    fn release_pointer(&mut self, capture: PointerCapture) {
        (**self).release_pointer(capture);
    }

    fn set_scroll_suppressed(&mut self, suppressed: bool) {
        (**self).set_scroll_suppressed(suppressed);
    }
}

/// A host that only hands out handles.
///
/// Useful when the caller drives [`SheetController::on_frame`](crate::SheetController::on_frame)
/// from its own loop and polls
/// [`SheetController::is_animating`](crate::SheetController::is_animating).
#[derive(Clone, Debug, Default)]
pub struct NoopHost {
    next: u64,
}

impl NoopHost {
    fn next(&mut self) -> u64 {
        self.next = self.next.wrapping_add(1);
        self.next
    }
}

impl SheetHost for NoopHost {
    fn request_frame(&mut self) -> FrameHandle {
        FrameHandle(self.next())
    }

    fn cancel_frame(&mut self, _handle: FrameHandle) {}

    fn capture_pointer(&mut self) -> PointerCapture {
        PointerCapture(self.next())
    }

    fn release_pointer(&mut self, _capture: PointerCapture) {}
}
