// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the Understory sheet demos.

use std::time::Duration;

use understory_sheet::{FrameHandle, PointerCapture, SheetHost};

/// Nominal display refresh used by the demos.
pub const FRAME: Duration = Duration::from_micros(16_667);

/// A host with a synthetic clock that logs what the sheet asks of it.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    next_id: u64,
    /// Frame the sheet is waiting on, if any.
    pub pending: Option<FrameHandle>,
    /// Current pointer capture, if any.
    pub capture: Option<PointerCapture>,
    /// Whether the page behind the sheet should stop scrolling.
    pub scroll_locked: bool,
}

impl SheetHost for ScriptedHost {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            log::trace!("host: frame {} cancelled", handle.0);
            self.pending = None;
        }
    }

    fn capture_pointer(&mut self) -> PointerCapture {
        self.next_id += 1;
        let capture = PointerCapture(self.next_id);
        log::info!("host: pointer captured ({})", capture.0);
        self.capture = Some(capture);
        capture
    }

    fn release_pointer(&mut self, capture: PointerCapture) {
        if self.capture == Some(capture) {
            log::info!("host: pointer released ({})", capture.0);
            self.capture = None;
        }
    }

    fn set_scroll_suppressed(&mut self, suppressed: bool) {
        log::info!("host: background scroll locked = {suppressed}");
        self.scroll_locked = suppressed;
    }
}
