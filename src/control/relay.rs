//! Relay models: a countdown auto-off relay and a plain toggle relay.
//!
//! ## Timed relay
//!
//! A trigger while off switches on for `on_duration`.  A trigger while on
//! extends the window by `extend`, capped relative to the trigger time:
//!
//! ```text
//! expires_at = max(expires_at, min(expires_at + extend, now + extend))
//! ```
//!
//! so hammering the key can never push the off-time more than one
//! increment past "now".  The window is never shortened.
//!
//! ## Toggle relay
//!
//! Every accepted trigger flips the output.  Triggers arriving within the
//! lockout window of the previous flip are ignored; this replaces a
//! blocking settle delay that would otherwise stall the whole loop.

use crate::timing::{Deadline, Millis};

/// Relay identifiers as wired on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RelayId {
    /// Auto-off relay (relay 1).
    Timed,
    /// Toggle relay (relay 2).
    Toggle,
}

/// Outcome of a timed-relay trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimedTrigger {
    /// Was off, now on until `expires_at`.
    SwitchedOn { expires_at: Millis },
    /// Already on; the window now ends at `expires_at`.
    Extended { expires_at: Millis },
}

pub struct TimedRelay {
    window: Option<Deadline>,
    on_duration: Millis,
    extend: Millis,
}

impl TimedRelay {
    pub fn new(on_duration: Millis, extend: Millis) -> Self {
        Self {
            window: None,
            on_duration,
            extend,
        }
    }

    pub fn trigger(&mut self, now: Millis) -> TimedTrigger {
        match self.window {
            Some(window) if !window.is_expired(now) => {
                let current = window.expires_at();
                let capped = current
                    .saturating_add(self.extend)
                    .min(now.saturating_add(self.extend));
                let expires_at = current.max(capped);
                self.window = Some(Deadline::until(now, expires_at));
                TimedTrigger::Extended { expires_at }
            }
            _ => {
                let window = Deadline::new(now, self.on_duration);
                self.window = Some(window);
                TimedTrigger::SwitchedOn {
                    expires_at: window.expires_at(),
                }
            }
        }
    }

    /// Force the relay off once its window has lapsed.
    /// Returns `true` on the on → off transition.
    pub fn expire(&mut self, now: Millis) -> bool {
        match self.window {
            Some(window) if window.is_expired(now) => {
                self.window = None;
                true
            }
            _ => false,
        }
    }

    /// Logical state as of the last `trigger`/`expire`.
    pub fn is_on(&self) -> bool {
        self.window.is_some()
    }

    pub fn expires_at(&self) -> Option<Millis> {
        self.window.map(|w| w.expires_at())
    }

    pub fn remaining(&self, now: Millis) -> Millis {
        self.window.map_or(0, |w| w.remaining(now))
    }
}

pub struct ToggleRelay {
    on: bool,
    lockout: Option<Deadline>,
    lockout_ms: Millis,
}

impl ToggleRelay {
    pub fn new(lockout_ms: Millis) -> Self {
        Self {
            on: false,
            lockout: None,
            lockout_ms,
        }
    }

    /// Flip the relay unless still inside the lockout window.
    /// Returns the new state, or `None` if the trigger was ignored.
    pub fn trigger(&mut self, now: Millis) -> Option<bool> {
        if self.lockout.is_some_and(|l| !l.is_expired(now)) {
            return None;
        }
        self.on = !self.on;
        self.lockout = Some(Deadline::new(now, self.lockout_ms));
        Some(self.on)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }
}
