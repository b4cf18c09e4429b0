//! Port traits — the hexagonal boundary between the rig core and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ RigService (domain)
//! ```
//!
//! Driven adapters (IR receiver, servos, relays, display, clock, event
//! sinks) implement these traits.  [`RigService`](super::service::RigService)
//! consumes them via generics, so the control logic never touches
//! hardware directly and runs unchanged against test doubles.

use super::commands::IrFrame;
use super::display::DisplaySnapshot;
use crate::control::relay::RelayId;
use crate::timing::Millis;

// ───────────────────────────────────────────────────────────────
// Remote port (driven adapter: IR decoder → domain)
// ───────────────────────────────────────────────────────────────

/// Decoded infrared input.  Demodulation happens on the other side.
pub trait RemotePort {
    /// Oldest unacknowledged frame, if any.  Calling this twice without
    /// [`acknowledge`](Self::acknowledge) yields the same frame.
    fn try_receive(&mut self) -> Option<IrFrame>;

    /// `false` while frames (typically repeats) are still arriving.
    fn is_idle(&self, now: Millis) -> bool;

    /// Release the current frame so the next one can be received.
    /// Must be called exactly once per frame returned by `try_receive`.
    fn acknowledge(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → servos / relays)
// ───────────────────────────────────────────────────────────────

/// Servo channels on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServoId {
    /// 180° positional servo.
    Positional,
    /// 360° continuous-rotation servo.
    Rotational,
}

/// Write-side port.  Fire-and-forget: adapters log their own failures.
pub trait ActuatorPort {
    /// Command a servo to `degrees` (0–180).
    fn set_servo_angle(&mut self, servo: ServoId, degrees: u8);

    /// Energise or release a relay coil.
    fn set_relay(&mut self, relay: RelayId, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Display port (driven adapter: domain → status readout)
// ───────────────────────────────────────────────────────────────

pub trait DisplayPort {
    /// One-time bring-up.  Failure is fatal: the rig is unusable blind.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Draw the readout for `snapshot`.
    fn render(&mut self, snapshot: &DisplaySnapshot);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// The sole time source.
pub trait ClockPort {
    /// Monotonic milliseconds since boot.
    fn now_ms(&self) -> Millis;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  They are diagnostics only and never feed back
/// into control decisions.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`DisplayPort::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayError {
    /// The panel did not acknowledge on its bus.
    NotResponding,
    /// The bus itself failed.
    Bus,
}

/// Errors from [`RigConfig::validate`](crate::config::RigConfig::validate).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotResponding => write!(f, "display not responding"),
            Self::Bus => write!(f, "display bus error"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
