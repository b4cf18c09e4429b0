//! Status readout: snapshot, refresh gate and text composition.
//!
//! The gate compares what the user would see against what was last drawn
//! and only asks the display to redraw on a difference.  It works purely
//! on cached logical state; it never reads a pin back, since the relay
//! pin and the logical relay state can briefly disagree.

use core::fmt::Write;

use heapless::String;
use serde::Serialize;

use crate::config::RigConfig;

/// Characters per readout line.
pub const LINE_WIDTH: usize = 24;
/// Lines per readout frame.
pub const FRAME_LINES: usize = 4;

/// Everything the readout shows, as last rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    /// Positional angle after [`AngleTransform`].
    pub angle: i16,
    /// Rotational servo target.
    pub rotation: u8,
    pub relay1: bool,
    pub relay2: bool,
}

/// Piecewise-linear remap of the positional angle for display only.
///
/// `[lower, center]` maps onto `[display_lower, mid]` and
/// `[center, upper]` onto `[mid, display_upper]`, with `mid` the midpoint
/// of the display range, so center always reads as the middle value
/// however asymmetric the clamp bounds are.
#[derive(Debug, Clone, Copy)]
pub struct AngleTransform {
    lower: i32,
    center: i32,
    upper: i32,
    display_lower: i32,
    display_upper: i32,
}

impl AngleTransform {
    pub fn new(
        lower: i16,
        center: i16,
        upper: i16,
        display_lower: i16,
        display_upper: i16,
    ) -> Self {
        Self {
            lower: lower.into(),
            center: center.into(),
            upper: upper.into(),
            display_lower: display_lower.into(),
            display_upper: display_upper.into(),
        }
    }

    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(
            config.positional_lower,
            config.positional_center,
            config.positional_upper,
            config.display_lower,
            config.display_upper,
        )
    }

    pub fn apply(&self, angle: i16) -> i16 {
        let angle = i32::from(angle);
        let mid = (self.display_lower + self.display_upper) / 2;
        let shown = if angle < self.center {
            let span = self.center - self.lower;
            if span == 0 {
                mid
            } else {
                mid - (self.center - angle) * (mid - self.display_lower) / span
            }
        } else {
            let span = self.upper - self.center;
            if span == 0 {
                mid
            } else {
                mid + (angle - self.center) * (self.display_upper - mid) / span
            }
        };
        shown.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
    }
}

/// Redraw-on-change gate.
#[derive(Debug, Default)]
pub struct DisplayGate {
    last: Option<DisplaySnapshot>,
}

impl DisplayGate {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Returns the snapshot to draw if it differs from the last one drawn,
    /// recording it as drawn.
    pub fn refresh(&mut self, candidate: DisplaySnapshot) -> Option<DisplaySnapshot> {
        if self.last == Some(candidate) {
            return None;
        }
        self.last = Some(candidate);
        Some(candidate)
    }

    pub fn last(&self) -> Option<&DisplaySnapshot> {
        self.last.as_ref()
    }
}

/// Text lines for a character or small graphic display.
pub type StatusFrame = [String<LINE_WIDTH>; FRAME_LINES];

/// Lay out the readout text for `snap`.
pub fn compose(snap: &DisplaySnapshot) -> StatusFrame {
    let mut frame: StatusFrame = Default::default();
    // Every line fits LINE_WIDTH; a full buffer would only truncate.
    let _ = frame[0].push_str("Servo Control");
    let _ = write!(frame[1], "180 deg: {}", snap.angle);
    let _ = write!(frame[2], "360 state: {}", snap.rotation);
    let _ = write!(
        frame[3],
        "R1: {}  R2: {}",
        on_off(snap.relay1),
        on_off(snap.relay2)
    );
    frame
}

fn on_off(on: bool) -> &'static str {
    if on { "ON" } else { "OFF" }
}
