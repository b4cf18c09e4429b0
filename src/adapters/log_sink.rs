//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (the ESP-IDF logger on the board, so UART / USB-CDC).
//! Readout refreshes are also emitted as one JSON line so host tooling
//! can follow the rig state from the serial console.

use log::{debug, info, warn};

use crate::app::display::DisplaySnapshot;
use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(snap) => {
                info!("START | {}", status_json(snap));
            }
            AppEvent::Pressed { code, command } => {
                info!("KEY | code=0x{:08X} command={:?}", code, command);
            }
            AppEvent::UnknownCode(code) => {
                debug!("KEY | code=0x{:08X} unmapped", code);
            }
            AppEvent::Repeated(command) => {
                debug!("KEY | repeat command={:?}", command);
            }
            AppEvent::PositionChanged(position) => {
                info!("SERVO180 | position={}", position);
            }
            AppEvent::RotationTargetChanged(target) => {
                info!("SERVO360 | target={}", target);
            }
            AppEvent::RelayChanged { relay, on, until } => match until {
                Some(until) => info!(
                    "RELAY | {:?} -> {} until={}ms",
                    relay,
                    if *on { "ON" } else { "OFF" },
                    until
                ),
                None => info!("RELAY | {:?} -> {}", relay, if *on { "ON" } else { "OFF" }),
            },
            AppEvent::RelayExtended { until } => {
                info!("RELAY | Timed extended until={}ms", until);
            }
            AppEvent::ToggleIgnored => {
                debug!("RELAY | Toggle press inside lockout, ignored");
            }
            AppEvent::DisplayRefreshed(snap) => {
                info!("STATUS | {}", status_json(snap));
            }
        }
    }
}

/// JSON rendering of a readout snapshot.
pub fn status_json(snap: &DisplaySnapshot) -> String {
    serde_json::to_string(snap).unwrap_or_else(|e| {
        warn!("STATUS | serialise failed: {}", e);
        String::new()
    })
}
