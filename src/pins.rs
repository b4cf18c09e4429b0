//! GPIO / peripheral pin assignments for the IrServo board (ESP32).
//!
//! Single source of truth — the firmware entry point references this
//! module rather than hard-coding pin numbers.

use crate::drivers::relay::Polarity;

// ---------------------------------------------------------------------------
// Servos (LEDC PWM)
// ---------------------------------------------------------------------------

/// 180° positional servo signal.
pub const SERVO_180_GPIO: i32 = 18;
/// 360° continuous-rotation servo signal.
pub const SERVO_360_GPIO: i32 = 19;

// ---------------------------------------------------------------------------
// Relays
// ---------------------------------------------------------------------------

/// Relay 1: timed load (auto-off).
pub const RELAY_TIMED_GPIO: i32 = 26;
/// Relay 2: toggled load.
pub const RELAY_TOGGLE_GPIO: i32 = 27;
/// Opto-isolated relay boards pull the coil in on a LOW input.
pub const RELAY_POLARITY: Polarity = Polarity::ActiveLow;

// ---------------------------------------------------------------------------
// IR receiver (38 kHz demodulating module, active-low output)
// ---------------------------------------------------------------------------

pub const IR_RX_GPIO: i32 = 15;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// Hobby servo frame rate.
pub const SERVO_PWM_FREQ_HZ: u32 = 50;
