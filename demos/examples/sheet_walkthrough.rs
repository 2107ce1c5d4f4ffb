// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sheet walkthrough.
//!
//! Drive a standard three-point sheet through open, drag, release and Escape
//! with a synthetic 60 Hz clock, printing where it ends up after each step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example sheet_walkthrough`

use std::time::Duration;

use kurbo::Size;
use understory_demos::{FRAME, ScriptedHost};
use ui_events::keyboard::{Key, NamedKey};
use understory_sheet::{SheetConfig, SheetController, SnapPoint};

const VIEWPORT_HEIGHT: f64 = 800.0;

fn run_frames(sheet: &mut SheetController<SnapPoint, ScriptedHost>, now: &mut Duration) -> usize {
    let mut frames = 0;
    while sheet.host_mut().pending.take().is_some() {
        *now += FRAME;
        sheet.on_frame(*now);
        frames += 1;
    }
    frames
}

fn report(label: &str, sheet: &SheetController<SnapPoint, ScriptedHost>) {
    let offset = sheet.translation(Size::new(390.0, VIEWPORT_HEIGHT * 0.9));
    println!(
        "{label:<28} snap={:?} position={:>6.2} offset_y={:>7.2} backdrop={:?} scroll_locked={}",
        sheet.current_snap_point(),
        sheet.position(),
        offset.y,
        sheet.backdrop(),
        sheet.host().scroll_locked,
    );
}

fn main() {
    env_logger::init();

    let config = SheetConfig::standard().with_viewport_extent(VIEWPORT_HEIGHT);
    let mut sheet = match SheetController::new(config, ScriptedHost::default()) {
        Ok(sheet) => sheet,
        Err(err) => {
            eprintln!("invalid sheet config: {err}");
            return;
        }
    };
    sheet.on_snap_point_change(|point| println!("  -> snap point changed to {point:?}"));
    sheet.on_close(|| println!("  -> closed"));

    let mut now = Duration::ZERO;
    report("start", &sheet);

    sheet.open(SnapPoint::Half);
    let frames = run_frames(&mut sheet, &mut now);
    report(&format!("open(Half), {frames} frames"), &sheet);

    sheet.open(SnapPoint::Full);
    for _ in 0..5 {
        let _ = sheet.host_mut().pending.take();
        now += FRAME;
        sheet.on_frame(now);
    }
    report("open(Full), 5 frames", &sheet);
    sheet.open(SnapPoint::Half);
    let frames = run_frames(&mut sheet, &mut now);
    report(&format!("retarget Half, {frames} frames"), &sheet);

    let y0 = 300.0;
    sheet.feed_pointer_down(y0);
    for step in 1..=4 {
        sheet.feed_pointer_move(y0 + f64::from(step) * 0.1 * VIEWPORT_HEIGHT);
    }
    report("dragged 40% down", &sheet);
    sheet.feed_pointer_up();
    let frames = run_frames(&mut sheet, &mut now);
    report(&format!("released, {frames} frames"), &sheet);

    sheet.open(SnapPoint::Full);
    let frames = run_frames(&mut sheet, &mut now);
    report(&format!("open(Full), {frames} frames"), &sheet);

    sheet.feed_key(&Key::Named(NamedKey::Escape));
    let frames = run_frames(&mut sheet, &mut now);
    report(&format!("Escape, {frames} frames"), &sheet);
}
