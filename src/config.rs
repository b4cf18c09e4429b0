//! Rig configuration parameters
//!
//! All tunable parameters for the actuator rig.  Values are compile-time
//! defaults; there is no persistent storage on this board.

use serde::{Deserialize, Serialize};

use crate::app::commands::Command;
use crate::app::ports::ConfigError;
use crate::control::rotational::DriveMode;
use crate::timing::Millis;

/// Which of the two "action" keys snaps the positional servo back to center.
///
/// The other key triggers the timed relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetBinding {
    Ok,
    Star,
}

impl ResetBinding {
    /// The key that resets the positional servo.
    pub fn reset_command(self) -> Command {
        match self {
            Self::Ok => Command::Ok,
            Self::Star => Command::Star,
        }
    }

    /// The key that triggers the timed relay.
    pub fn relay_command(self) -> Command {
        match self {
            Self::Ok => Command::Star,
            Self::Star => Command::Ok,
        }
    }
}

/// Core rig configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigConfig {
    // --- Positional (180°) servo ---
    /// Electrical rest position in degrees
    pub positional_center: i16,
    /// Inclusive lower clamp in degrees
    pub positional_lower: i16,
    /// Inclusive upper clamp in degrees
    pub positional_upper: i16,
    /// Degrees moved per Up/Down event
    pub positional_step: i16,
    /// Key bound to "return to center"
    pub reset_binding: ResetBinding,

    // --- Continuous-rotation (360°) servo ---
    /// Angle that means "stopped"
    pub rotation_neutral: u8,
    /// Direct or smoothed drive
    pub rotation_drive: DriveMode,
    /// Max change per smoothing tick (degrees)
    pub rotation_step: u8,
    /// Smoothing update cadence (milliseconds)
    pub smoothing_interval_ms: Millis,
    /// Rotation self-centers after this long without Left/Right (milliseconds)
    pub command_timeout_ms: Millis,

    // --- Remote input ---
    /// Minimum interval between auto-repeats of a held Up/Down (milliseconds)
    pub repeat_delay_ms: Millis,
    /// Receiver counts as idle after this long without a frame (milliseconds)
    pub remote_idle_ms: Millis,

    // --- Relays ---
    /// Timed relay on-window for a fresh trigger (milliseconds)
    pub timed_relay_on_ms: Millis,
    /// Extension granted by a trigger while already on (milliseconds)
    pub timed_relay_extend_ms: Millis,
    /// Toggle relay ignores presses this soon after a toggle (milliseconds)
    pub toggle_lockout_ms: Millis,

    // --- Display ---
    /// Readout value shown for `positional_lower`
    pub display_lower: i16,
    /// Readout value shown for `positional_upper`
    pub display_upper: i16,

    // --- Timing ---
    /// Main loop pacing (milliseconds)
    pub poll_interval_ms: u32,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            // Positional servo
            positional_center: 92,
            positional_lower: 45,
            positional_upper: 142,
            positional_step: 1,
            reset_binding: ResetBinding::Ok,

            // Rotation
            rotation_neutral: 90,
            rotation_drive: DriveMode::Direct,
            rotation_step: 10,
            smoothing_interval_ms: 20, // 50 Hz, one servo frame
            command_timeout_ms: 200,

            // Remote
            repeat_delay_ms: 300,
            remote_idle_ms: 150, // NEC repeat frames arrive every ~108 ms

            // Relays
            timed_relay_on_ms: 10_000,
            timed_relay_extend_ms: 5_000,
            toggle_lockout_ms: 200,

            // Display
            display_lower: 0,
            display_upper: 180,

            // Timing
            poll_interval_ms: 1,
        }
    }
}

impl RigConfig {
    /// Check every cross-field invariant the controllers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.positional_lower > self.positional_center {
            return Err(ConfigError::ValidationFailed(
                "positional_lower must not exceed positional_center",
            ));
        }
        if self.positional_center > self.positional_upper {
            return Err(ConfigError::ValidationFailed(
                "positional_center must not exceed positional_upper",
            ));
        }
        if self.positional_lower < 0 || self.positional_upper > 180 {
            return Err(ConfigError::ValidationFailed(
                "positional bounds must lie within 0..=180",
            ));
        }
        if self.positional_step <= 0 {
            return Err(ConfigError::ValidationFailed("positional_step must be positive"));
        }
        if self.rotation_neutral > 180 {
            return Err(ConfigError::ValidationFailed("rotation_neutral must be <= 180"));
        }
        if self.rotation_step == 0 {
            return Err(ConfigError::ValidationFailed("rotation_step must be positive"));
        }
        if self.smoothing_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "smoothing_interval_ms must be positive",
            ));
        }
        if self.timed_relay_on_ms == 0 {
            return Err(ConfigError::ValidationFailed("timed_relay_on_ms must be positive"));
        }
        if self.display_lower >= self.display_upper {
            return Err(ConfigError::ValidationFailed(
                "display_lower must be below display_upper",
            ));
        }
        Ok(())
    }
}
