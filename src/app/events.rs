//! Outbound application events.
//!
//! The [`RigService`](super::service::RigService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — log to serial, count them in tests.

use super::commands::{Command, RemoteCode};
use super::display::DisplaySnapshot;
use crate::control::relay::RelayId;
use crate::timing::Millis;

/// Structured events emitted by the rig core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries the initial readout).
    Started(DisplaySnapshot),

    /// A fresh key press was decoded.
    Pressed { code: RemoteCode, command: Command },

    /// A fresh key press carried a code not in the table.
    UnknownCode(RemoteCode),

    /// A held Up/Down was re-applied by the repeat scheduler.
    Repeated(Command),

    /// The positional servo moved.
    PositionChanged(i16),

    /// The rotational target changed (spin or self-centering).
    RotationTargetChanged(u8),

    /// A relay output was switched.
    RelayChanged {
        relay: RelayId,
        on: bool,
        /// Auto-off time for the timed relay.
        until: Option<Millis>,
    },

    /// The timed relay was re-triggered while on.
    RelayExtended { until: Millis },

    /// A toggle press landed inside the lockout window and was ignored.
    ToggleIgnored,

    /// The readout was redrawn.
    DisplayRefreshed(DisplaySnapshot),
}
