// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_sheet --heading-base-level=0

//! Understory Sheet: a headless controller for panels that rest at snap points.
//!
//! A sheet (think bottom sheet or drawer) has a single scalar position and a
//! small ordered set of snap points it can rest at. This crate couples three
//! pieces into one interaction engine:
//!
//! - [`snap`]: snap point sets and nearest-snap resolution with a stable,
//!   order-based tie-break.
//! - [`gesture`]: a drag tracker that maps pointer travel to a position,
//!   one-to-one, with clamping.
//! - [`SheetController`]: the state machine. Programmatic requests animate
//!   through an [`understory_spring::Spring`]; a drag takes the position over
//!   directly and, on release, hands it back to the spring aimed at the
//!   nearest snap point.
//!
//! Positions are percentage offsets where larger means more hidden. With the
//! standard configuration the sheet is closed at 100, half open at 50 and
//! fully open at 10.
//!
//! The crate renders nothing and owns no event loop. The host translates its
//! own pointer events into `feed_*` calls, passes keys as
//! [`ui_events::keyboard::Key`], implements
//! [`SheetHost`] to provide frame callbacks and pointer capture, and draws the
//! position it is notified about.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//!
//! use understory_sheet::{NoopHost, SheetConfig, SheetController, SnapPoint};
//!
//! let mut sheet = SheetController::new(SheetConfig::standard(), NoopHost::default()).unwrap();
//! assert!(!sheet.is_open());
//!
//! sheet.open(SnapPoint::Half);
//! assert!(sheet.is_open());
//!
//! // The host calls `on_frame` once per display frame while animating.
//! let mut now = Duration::ZERO;
//! while sheet.is_animating() {
//!     sheet.on_frame(now);
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(sheet.position(), 50.0);
//!
//! // Drag the sheet 40% of the viewport down and let go: it settles closed.
//! sheet.feed_pointer_down(300.0);
//! sheet.feed_pointer_move(700.0);
//! assert_eq!(sheet.position(), 90.0);
//! sheet.feed_pointer_up();
//! assert_eq!(sheet.current_snap_point(), SnapPoint::Closed);
//! ```
//!
//! ## Notifications
//!
//! Implement [`SheetListener`] or use the closure helpers
//! ([`SheetController::on_position_change`],
//! [`SheetController::on_snap_point_change`], [`SheetController::on_close`]).
//!
//! ## Custom snap points
//!
//! [`SheetConfig`] is generic over the snap point id. Any `Copy + PartialEq`
//! type works, with any number of snap points:
//!
//! ```rust
//! use understory_sheet::{NoopHost, SheetConfig, SheetController, SnapEntry, SnapPoints};
//!
//! let points = SnapPoints::new([
//!     SnapEntry::new("hidden", 100.0),
//!     SnapEntry::new("peek", 85.0),
//!     SnapEntry::new("half", 50.0),
//!     SnapEntry::new("full", 0.0),
//! ])
//! .unwrap();
//! let config = SheetConfig::new(points, "peek", "hidden", "full");
//! let sheet = SheetController::new(config, NoopHost::default()).unwrap();
//! assert_eq!(sheet.position(), 85.0);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod config;
mod controller;
pub mod gesture;
mod host;
mod listener;
pub mod snap;

pub use config::{SheetConfig, SheetConfigError, SnapRole};
pub use controller::{Backdrop, SheetController, SheetState};
pub use host::{FrameHandle, NoopHost, PointerCapture, SheetHost};
pub use listener::{SheetListener, Subscription};
pub use snap::{SnapEntry, SnapPoint, SnapPoints, SnapPointsError};
pub use understory_spring::{Spring, SpringConfig};
