//! Positional (180°) servo model.
//!
//! Pure state: a clamped angle with a rest position.  Up/Down saturate at
//! the configured bounds; they never wrap and never fail.

use crate::config::RigConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalServo {
    position: i16,
    center: i16,
    lower: i16,
    upper: i16,
    step: i16,
}

impl PositionalServo {
    /// Build a servo resting at `center`.
    ///
    /// `center` is clamped into `[lower, upper]` so the bounds invariant
    /// holds even for an unvalidated configuration.
    pub fn new(center: i16, lower: i16, upper: i16, step: i16) -> Self {
        let (lower, upper) = if lower <= upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let center = center.clamp(lower, upper);
        Self {
            position: center,
            center,
            lower,
            upper,
            step,
        }
    }

    pub fn from_config(config: &RigConfig) -> Self {
        Self::new(
            config.positional_center,
            config.positional_lower,
            config.positional_upper,
            config.positional_step,
        )
    }

    /// Move one step toward `upper`.  Returns `true` if the position changed.
    pub fn step_up(&mut self) -> bool {
        self.offset(i32::from(self.step))
    }

    /// Move one step toward `lower`.  Returns `true` if the position changed.
    pub fn step_down(&mut self) -> bool {
        self.offset(-i32::from(self.step))
    }

    /// Snap back to the rest position.  Returns `true` if the position changed.
    pub fn reset(&mut self) -> bool {
        let changed = self.position != self.center;
        self.position = self.center;
        changed
    }

    fn offset(&mut self, delta: i32) -> bool {
        let next = (i32::from(self.position) + delta)
            .clamp(i32::from(self.lower), i32::from(self.upper)) as i16;
        let changed = next != self.position;
        self.position = next;
        changed
    }

    pub fn position(&self) -> i16 {
        self.position
    }

    /// Position as a servo output angle.
    pub fn angle(&self) -> u8 {
        self.position.clamp(0, 180) as u8
    }

    pub fn center(&self) -> i16 {
        self.center
    }

    pub fn bounds(&self) -> (i16, i16) {
        (self.lower, self.upper)
    }
}
