//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns both servo drivers, both relay drivers and the IR receiver,
//! exposing them through [`ActuatorPort`] and [`RemotePort`].  This is
//! the only module in the system that touches actual outputs.  Driver
//! write failures are logged and swallowed: the core treats actuation
//! as fire-and-forget.

use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use log::warn;

use crate::app::commands::IrFrame;
use crate::app::ports::{ActuatorPort, RemotePort, ServoId};
use crate::control::relay::RelayId;
use crate::drivers::relay::RelayDriver;
use crate::drivers::servo::ServoDriver;
use crate::timing::Millis;

/// Concrete adapter that combines all rig hardware behind port traits.
pub struct HardwareAdapter<S, P, R> {
    positional: ServoDriver<S>,
    rotational: ServoDriver<S>,
    timed_relay: RelayDriver<P>,
    toggle_relay: RelayDriver<P>,
    remote: R,
}

impl<S, P, R> HardwareAdapter<S, P, R>
where
    S: SetDutyCycle,
    P: OutputPin,
    R: RemotePort,
{
    pub fn new(
        positional: ServoDriver<S>,
        rotational: ServoDriver<S>,
        timed_relay: RelayDriver<P>,
        toggle_relay: RelayDriver<P>,
        remote: R,
    ) -> Self {
        Self {
            positional,
            rotational,
            timed_relay,
            toggle_relay,
            remote,
        }
    }

    /// Last angle written to `servo`.
    pub fn servo_angle(&self, servo: ServoId) -> Option<u8> {
        match servo {
            ServoId::Positional => self.positional.angle(),
            ServoId::Rotational => self.rotational.angle(),
        }
    }

    /// Cached logical relay state (never read back from the pin).
    pub fn relay_is_on(&self, relay: RelayId) -> bool {
        match relay {
            RelayId::Timed => self.timed_relay.is_on(),
            RelayId::Toggle => self.toggle_relay.is_on(),
        }
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, P, R> ActuatorPort for HardwareAdapter<S, P, R>
where
    S: SetDutyCycle,
    P: OutputPin,
    R: RemotePort,
{
    fn set_servo_angle(&mut self, servo: ServoId, degrees: u8) {
        let driver = match servo {
            ServoId::Positional => &mut self.positional,
            ServoId::Rotational => &mut self.rotational,
        };
        if let Err(e) = driver.set_angle(degrees) {
            warn!("SERVO | {:?} write failed: {:?}", servo, e);
        }
    }

    fn set_relay(&mut self, relay: RelayId, on: bool) {
        let driver = match relay {
            RelayId::Timed => &mut self.timed_relay,
            RelayId::Toggle => &mut self.toggle_relay,
        };
        if let Err(e) = driver.set(on) {
            warn!("RELAY | {:?} write failed: {:?}", relay, e);
        }
    }
}

// ── RemotePort implementation ─────────────────────────────────

impl<S, P, R> RemotePort for HardwareAdapter<S, P, R>
where
    S: SetDutyCycle,
    P: OutputPin,
    R: RemotePort,
{
    fn try_receive(&mut self) -> Option<IrFrame> {
        self.remote.try_receive()
    }

    fn is_idle(&self, now: Millis) -> bool {
        self.remote.is_idle(now)
    }

    fn acknowledge(&mut self) {
        self.remote.acknowledge();
    }
}
