//! Application service — the hexagonal core.
//!
//! [`RigService`] owns the configuration and the [`ControllerState`] and
//! runs one polling iteration per [`tick`](RigService::tick).  All I/O
//! flows through port traits injected at call sites, making the entire
//! service testable with mock adapters.
//!
//! ```text
//!   RemotePort ──▶ ┌──────────────────────────────┐ ──▶ ActuatorPort
//!                  │          RigService          │
//!        now ────▶ │ decoder · scheduler · models │ ──▶ DisplayPort
//!                  └──────────────────────────────┘ ──▶ EventSink
//! ```
//!
//! ## Iteration order
//!
//! 1. expire the timed relay if due
//! 2. return the rotation target to neutral if the keep-alive lapsed
//! 3. advance the smoothed rotation if its cadence is due
//! 4. take one IR frame, if any: decode and apply fresh-press effects
//! 5. otherwise re-apply a held Up/Down if the repeat interval elapsed
//! 6. write both servo outputs
//! 7. redraw the readout if anything visible changed
//!
//! Expiry runs before input, so a command arriving in the same iteration
//! as a timeout still takes effect.

use log::{debug, info};

use crate::config::RigConfig;
use crate::control::relay::{RelayId, TimedTrigger};
use crate::control::rotational::SpinDirection;
use crate::error::{Error, Result};
use crate::timing::Millis;

use super::commands::{CodeTable, Command};
use super::decoder::Decoded;
use super::display::DisplaySnapshot;
use super::events::AppEvent;
use super::ports::{ActuatorPort, DisplayPort, EventSink, RemotePort, ServoId};
use super::state::ControllerState;

// ───────────────────────────────────────────────────────────────
// RigService
// ───────────────────────────────────────────────────────────────

pub struct RigService {
    config: RigConfig,
    state: ControllerState,
    iterations: u64,
}

impl RigService {
    /// Validate `config` and build the service with the default code table.
    ///
    /// Does **not** touch hardware; call [`start`](Self::start) next.
    pub fn new(config: RigConfig) -> Result<Self> {
        Self::with_code_table(config, CodeTable::default())
    }

    pub fn with_code_table(config: RigConfig, table: CodeTable) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        let state = ControllerState::new(&config, table);
        Ok(Self {
            config,
            state,
            iterations: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Bring up the display and drive every output to its rest state.
    ///
    /// A display that fails to initialise is fatal and returned as
    /// [`Error::Display`].
    pub fn start(
        &mut self,
        hw: &mut impl ActuatorPort,
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        display.init().map_err(Error::Display)?;

        self.write_servos(hw);
        hw.set_relay(RelayId::Timed, false);
        hw.set_relay(RelayId::Toggle, false);

        let snap = self.state.snapshot();
        self.state.display.refresh(snap);
        display.render(&snap);

        sink.emit(&AppEvent::Started(snap));
        info!(
            "RigService started (center={}, neutral={}, drive={:?})",
            self.config.positional_center, self.config.rotation_neutral, self.config.rotation_drive
        );
        Ok(())
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one polling iteration at monotonic time `now`.
    ///
    /// The `io` parameter satisfies **both** [`RemotePort`] and
    /// [`ActuatorPort`]: on the board a single adapter owns the receiver
    /// and the outputs.
    pub fn tick(
        &mut self,
        now: Millis,
        io: &mut (impl RemotePort + ActuatorPort),
        display: &mut impl DisplayPort,
        sink: &mut impl EventSink,
    ) {
        self.iterations += 1;

        // 1. Timed relay auto-off
        if self.state.timed_relay.expire(now) {
            io.set_relay(RelayId::Timed, false);
            sink.emit(&AppEvent::RelayChanged {
                relay: RelayId::Timed,
                on: false,
                until: None,
            });
        }

        // 2. Rotation self-centering
        if self.state.rotational.expire(now) {
            sink.emit(&AppEvent::RotationTargetChanged(self.state.rotational.target()));
        }

        // 3. Smoothing step
        self.state.rotational.advance(now);

        // 4./5. Input
        if let Some(frame) = io.try_receive() {
            io.acknowledge();
            match self.state.decoder.decode(frame) {
                Decoded::Fresh { code, command } => {
                    self.state.scheduler.on_fresh_press(command, now);
                    if command == Command::None {
                        sink.emit(&AppEvent::UnknownCode(code));
                    } else {
                        sink.emit(&AppEvent::Pressed { code, command });
                        self.apply_press(command, now, io, sink);
                    }
                }
                Decoded::Repeat { held } => {
                    if held.is_rotation() {
                        self.state.rotational.hold(now);
                    }
                }
            }
        } else if let Some(command) = self.state.scheduler.poll(now, io.is_idle(now)) {
            sink.emit(&AppEvent::Repeated(command));
            self.apply_step(command, sink);
        }

        // 6. Outputs
        self.write_servos(io);

        // 7. Readout
        if let Some(snap) = self.state.display.refresh(self.state.snapshot()) {
            display.render(&snap);
            sink.emit(&AppEvent::DisplayRefreshed(snap));
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn config(&self) -> &RigConfig {
        &self.config
    }

    /// What the readout should show right now.
    pub fn snapshot(&self) -> DisplaySnapshot {
        self.state.snapshot()
    }

    /// Loop iterations executed since startup.
    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ── Internal ──────────────────────────────────────────────

    /// One-shot effects of a fresh press.
    fn apply_press(
        &mut self,
        command: Command,
        now: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match command {
            Command::Up | Command::Down => self.apply_step(command, sink),
            Command::Left => self.spin(SpinDirection::Left, now, sink),
            Command::Right => self.spin(SpinDirection::Right, now, sink),
            Command::Ok | Command::Star => {
                if command == self.config.reset_binding.reset_command() {
                    if self.state.positional.reset() {
                        sink.emit(&AppEvent::PositionChanged(self.state.positional.position()));
                    }
                } else if command == self.config.reset_binding.relay_command() {
                    self.trigger_timed_relay(now, hw, sink);
                }
            }
            Command::Square => self.trigger_toggle_relay(now, hw, sink),
            Command::None => {}
        }
    }

    /// Up/Down on the positional servo; shared by fresh press and auto-repeat.
    fn apply_step(&mut self, command: Command, sink: &mut impl EventSink) {
        let moved = match command {
            Command::Up => self.state.positional.step_up(),
            Command::Down => self.state.positional.step_down(),
            _ => false,
        };
        if moved {
            sink.emit(&AppEvent::PositionChanged(self.state.positional.position()));
        }
    }

    fn spin(&mut self, direction: SpinDirection, now: Millis, sink: &mut impl EventSink) {
        if self.state.rotational.spin(direction, now) {
            sink.emit(&AppEvent::RotationTargetChanged(self.state.rotational.target()));
        }
    }

    fn trigger_timed_relay(
        &mut self,
        now: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match self.state.timed_relay.trigger(now) {
            TimedTrigger::SwitchedOn { expires_at } => {
                hw.set_relay(RelayId::Timed, true);
                sink.emit(&AppEvent::RelayChanged {
                    relay: RelayId::Timed,
                    on: true,
                    until: Some(expires_at),
                });
            }
            TimedTrigger::Extended { expires_at } => {
                debug!("Timed relay extended until {} ms", expires_at);
                sink.emit(&AppEvent::RelayExtended { until: expires_at });
            }
        }
    }

    fn trigger_toggle_relay(
        &mut self,
        now: Millis,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match self.state.toggle_relay.trigger(now) {
            Some(on) => {
                // Output follows the logical flip in the same call.
                hw.set_relay(RelayId::Toggle, on);
                sink.emit(&AppEvent::RelayChanged {
                    relay: RelayId::Toggle,
                    on,
                    until: None,
                });
            }
            None => sink.emit(&AppEvent::ToggleIgnored),
        }
    }

    fn write_servos(&self, hw: &mut impl ActuatorPort) {
        hw.set_servo_angle(ServoId::Positional, self.state.positional.angle());
        hw.set_servo_angle(ServoId::Rotational, self.state.rotational.current());
    }
}
