//! Debounce / auto-repeat scheduler.
//!
//! Decides, every loop iteration, whether the held command should be
//! re-applied.  The remote's own repeat cadence (~108 ms for NEC) is
//! jittery and too fast for single-degree stepping, so the scheduler
//! re-fires at its own fixed interval instead.
//!
//! ```text
//!  press Up           held ......................... release
//!    │                  │                               │
//!    ▼                  ▼                               ▼
//!  apply ──300ms── apply ──300ms── apply ──300ms──  (receiver idle: stop)
//! ```
//!
//! Only [`Command::Up`] and [`Command::Down`] auto-repeat; everything else
//! is one-shot and the repeat path is a no-op for it.

use crate::app::commands::Command;
use crate::timing::{Cadence, Millis};

pub struct RepeatScheduler {
    held: Command,
    cadence: Cadence,
}

impl RepeatScheduler {
    pub fn new(repeat_delay_ms: Millis) -> Self {
        Self {
            held: Command::None,
            cadence: Cadence::new(0, repeat_delay_ms),
        }
    }

    /// Record a fresh press.  The caller applies it immediately; the first
    /// auto-repeat is due one full interval later.
    pub fn on_fresh_press(&mut self, command: Command, now: Millis) {
        self.held = command;
        self.cadence.restart(now);
    }

    /// Returns the command to re-apply this iteration, if any.
    ///
    /// `receiver_idle` is the IR receiver's idle predicate: `false` while
    /// repeat frames are still arriving.
    pub fn poll(&mut self, now: Millis, receiver_idle: bool) -> Option<Command> {
        if !self.held.is_auto_repeat() || receiver_idle {
            return None;
        }
        self.cadence.ready(now).then_some(self.held)
    }

    pub fn held(&self) -> Command {
        self.held
    }

    pub fn repeat_delay(&self) -> Millis {
        self.cadence.interval()
    }
}
