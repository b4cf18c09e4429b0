//! Relay coil driver.
//!
//! Most hobby relay boards are active-low (the opto-isolator input sinks
//! current), so the logical on/off state is translated to a pin level here
//! and nowhere else.  The driver caches the logical state it last wrote;
//! callers never read the pin back to learn whether the relay is on.

use embedded_hal::digital::{OutputPin, PinState};

/// Coil polarity of the relay board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    ActiveHigh,
    ActiveLow,
}

pub struct RelayDriver<P> {
    pin: P,
    polarity: Polarity,
    on: bool,
}

impl<P: OutputPin> RelayDriver<P> {
    /// Take ownership of `pin` and drive the coil off.
    pub fn new(pin: P, polarity: Polarity) -> Result<Self, P::Error> {
        let mut relay = Self {
            pin,
            polarity,
            on: false,
        };
        relay.write(false)?;
        Ok(relay)
    }

    pub fn set(&mut self, on: bool) -> Result<(), P::Error> {
        self.write(on)?;
        self.on = on;
        Ok(())
    }

    fn write(&mut self, on: bool) -> Result<(), P::Error> {
        let level = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        self.pin.set_state(PinState::from(level))
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
