//! Hobby servo driver (50 Hz PWM, 0.5–2.5 ms pulse).
//!
//! Generic over any `embedded-hal` 1.0 [`SetDutyCycle`] channel, so the
//! same driver runs on the ESP32 LEDC peripheral and on a test double.
//!
//! | Angle | Pulse   | Positional servo | Continuous servo  |
//! |-------|---------|------------------|-------------------|
//! | 0     | 500 µs  | full one way     | full speed CW     |
//! | 90    | 1500 µs | middle           | stopped           |
//! | 180   | 2500 µs | full other way   | full speed CCW    |
//!
//! ## Dual-target design
//!
//! The PWM channel must be configured for a 20 ms period by the caller;
//! this driver only converts angles to duty fractions.

use embedded_hal::pwm::SetDutyCycle;

/// One servo frame (50 Hz).
pub const PERIOD_US: u16 = 20_000;
pub const MIN_PULSE_US: u16 = 500;
pub const MAX_PULSE_US: u16 = 2_500;

pub struct ServoDriver<P> {
    pwm: P,
    min_pulse_us: u16,
    max_pulse_us: u16,
    angle: Option<u8>,
}

impl<P: SetDutyCycle> ServoDriver<P> {
    pub fn new(pwm: P) -> Self {
        Self::with_pulse_range(pwm, MIN_PULSE_US, MAX_PULSE_US)
    }

    /// Use a custom pulse range for servos that stall at the defaults.
    pub fn with_pulse_range(pwm: P, min_pulse_us: u16, max_pulse_us: u16) -> Self {
        let max_pulse_us = max_pulse_us.min(PERIOD_US);
        Self {
            pwm,
            min_pulse_us: min_pulse_us.min(max_pulse_us),
            max_pulse_us,
            angle: None,
        }
    }

    /// Command `angle` (clamped to 0–180).  Repeating the current angle
    /// does not touch the peripheral.
    pub fn set_angle(&mut self, angle: u8) -> Result<(), P::Error> {
        let angle = angle.min(180);
        if self.angle == Some(angle) {
            return Ok(());
        }
        self.pwm
            .set_duty_cycle_fraction(self.pulse_us(angle), PERIOD_US)?;
        self.angle = Some(angle);
        Ok(())
    }

    /// Stop sending pulses (servo goes limp).
    pub fn release(&mut self) -> Result<(), P::Error> {
        self.pwm.set_duty_cycle_fully_off()?;
        self.angle = None;
        Ok(())
    }

    pub fn pulse_us(&self, angle: u8) -> u16 {
        let span = u32::from(self.max_pulse_us - self.min_pulse_us);
        let offset = u32::from(angle.min(180)) * span / 180;
        self.min_pulse_us + offset as u16
    }

    /// Last angle written, `None` before the first write or after release.
    pub fn angle(&self) -> Option<u8> {
        self.angle
    }
}
