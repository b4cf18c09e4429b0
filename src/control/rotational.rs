//! Continuous-rotation (360°) servo model.
//!
//! For a continuous servo the "angle" is a speed: `neutral` (usually 90)
//! means stopped, 180 full speed one way, 0 full speed the other.
//!
//! ## Self-centering
//!
//! `Left`/`Right` arm a keep-alive deadline.  When it lapses the target
//! returns to neutral, so the rig always stops once input stops.
//!
//! ## Drive modes
//!
//! | Mode       | `current` follows `target`                          |
//! |------------|-----------------------------------------------------|
//! | `Direct`   | immediately, on every target change                 |
//! | `Smoothed` | by at most `step` per smoothing tick, no overshoot  |

use serde::{Deserialize, Serialize};

use crate::config::RigConfig;
use crate::timing::{Cadence, Deadline, Millis};

/// Target for `Left`: full speed counter-clockwise.
pub const SPIN_LEFT_TARGET: u8 = 180;
/// Target for `Right`: full speed clockwise.
pub const SPIN_RIGHT_TARGET: u8 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DriveMode {
    #[default]
    Direct,
    Smoothed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDirection {
    Left,
    Right,
}

impl SpinDirection {
    pub fn target(self) -> u8 {
        match self {
            Self::Left => SPIN_LEFT_TARGET,
            Self::Right => SPIN_RIGHT_TARGET,
        }
    }
}

pub struct RotationalServo {
    current: u8,
    target: u8,
    neutral: u8,
    step: u8,
    mode: DriveMode,
    keep_alive: Deadline,
    smoothing: Cadence,
}

impl RotationalServo {
    pub fn new(
        neutral: u8,
        step: u8,
        mode: DriveMode,
        command_timeout_ms: Millis,
        smoothing_interval_ms: Millis,
    ) -> Self {
        let neutral = neutral.min(180);
        Self {
            current: neutral,
            target: neutral,
            neutral,
            step: step.max(1),
            mode,
            keep_alive: Deadline::new(0, command_timeout_ms),
            smoothing: Cadence::new(0, smoothing_interval_ms),
        }
    }

    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(
            config.rotation_neutral,
            config.rotation_step,
            config.rotation_drive,
            config.command_timeout_ms,
            config.smoothing_interval_ms,
        )
    }

    /// Apply a Left/Right command: set the target and arm the keep-alive.
    /// Returns `true` if the target changed.
    pub fn spin(&mut self, direction: SpinDirection, now: Millis) -> bool {
        self.keep_alive.rearm(now);
        self.set_target(direction.target())
    }

    /// Keep the current spin alive without changing the target
    /// (the key is still held).
    pub fn hold(&mut self, now: Millis) {
        self.keep_alive.rearm(now);
    }

    /// Revert to neutral once the keep-alive has lapsed.
    /// Returns `true` if the target changed.
    pub fn expire(&mut self, now: Millis) -> bool {
        if self.keep_alive.is_expired(now) {
            self.set_target(self.neutral)
        } else {
            false
        }
    }

    /// Advance `current` toward `target` if a smoothing tick is due.
    /// Returns `true` if `current` moved.  No-op in direct mode.
    pub fn advance(&mut self, now: Millis) -> bool {
        if self.mode != DriveMode::Smoothed || !self.smoothing.ready(now) {
            return false;
        }
        let next = if self.current < self.target {
            self.current.saturating_add(self.step).min(self.target)
        } else {
            self.current.saturating_sub(self.step).max(self.target)
        };
        let moved = next != self.current;
        self.current = next;
        moved
    }

    fn set_target(&mut self, target: u8) -> bool {
        let changed = target != self.target;
        self.target = target;
        if self.mode == DriveMode::Direct {
            self.current = target;
        }
        changed
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    pub fn target(&self) -> u8 {
        self.target
    }

    pub fn neutral(&self) -> u8 {
        self.neutral
    }

    pub fn mode(&self) -> DriveMode {
        self.mode
    }

    pub fn is_stopped(&self) -> bool {
        self.current == self.neutral && self.target == self.neutral
    }
}
