//! Owned controller state threaded through every loop iteration.
//!
//! `ControllerState` is the single aggregate holding the input decoder,
//! the repeat scheduler, every actuator model and the readout gate.  It
//! is created once at startup and mutated in place until power-off.

use super::commands::CodeTable;
use super::decoder::CommandDecoder;
use super::display::{AngleTransform, DisplayGate, DisplaySnapshot};
use crate::config::RigConfig;
use crate::control::positional::PositionalServo;
use crate::control::relay::{TimedRelay, ToggleRelay};
use crate::control::rotational::RotationalServo;
use crate::scheduler::RepeatScheduler;

pub struct ControllerState {
    // -- Input --
    pub decoder: CommandDecoder,
    pub scheduler: RepeatScheduler,

    // -- Actuators --
    pub positional: PositionalServo,
    pub rotational: RotationalServo,
    pub timed_relay: TimedRelay,
    pub toggle_relay: ToggleRelay,

    // -- Readout --
    pub display: DisplayGate,
    pub transform: AngleTransform,
}

impl ControllerState {
    /// Fixed startup defaults: servos centered, rotation neutral, relays off.
    pub fn new(config: &RigConfig, table: CodeTable) -> Self {
        Self {
            decoder: CommandDecoder::new(table),
            scheduler: RepeatScheduler::new(config.repeat_delay_ms),
            positional: PositionalServo::from_config(config),
            rotational: RotationalServo::from_config(config),
            timed_relay: TimedRelay::new(config.timed_relay_on_ms, config.timed_relay_extend_ms),
            toggle_relay: ToggleRelay::new(config.toggle_lockout_ms),
            display: DisplayGate::new(),
            transform: AngleTransform::from_config(config),
        }
    }

    /// What the readout should show right now.
    pub fn snapshot(&self) -> DisplaySnapshot {
        DisplaySnapshot {
            angle: self.transform.apply(self.positional.position()),
            rotation: self.rotational.target(),
            relay1: self.timed_relay.is_on(),
            relay2: self.toggle_relay.is_on(),
        }
    }
}
