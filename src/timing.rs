//! Monotonic-time primitives for the polling loop.
//!
//! Nothing in the core ever sleeps.  Every timeout, debounce window and
//! update cadence is a recorded time point compared against the current
//! monotonic clock on each loop iteration.
//!
//! | Type        | Shape                     | Used by                         |
//! |-------------|---------------------------|---------------------------------|
//! | `Deadline`  | armed-at + duration       | relay windows, rotation timeout |
//! | `Cadence`   | self re-arming `Deadline` | smoothing, auto-repeat          |

/// Monotonic milliseconds since boot.
pub type Millis = u64;

/// A time point after which a condition is considered expired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    armed_at: Millis,
    duration: Millis,
}

impl Deadline {
    pub const fn new(armed_at: Millis, duration: Millis) -> Self {
        Self { armed_at, duration }
    }

    /// A deadline that expires exactly at `expires_at`.
    pub fn until(now: Millis, expires_at: Millis) -> Self {
        Self::new(now, expires_at.saturating_sub(now))
    }

    pub fn armed_at(&self) -> Millis {
        self.armed_at
    }

    pub fn duration(&self) -> Millis {
        self.duration
    }

    pub fn expires_at(&self) -> Millis {
        self.armed_at.saturating_add(self.duration)
    }

    /// `true` once at least `duration` has elapsed since arming.
    ///
    /// A clock reading earlier than `armed_at` counts as zero elapsed time.
    pub fn is_expired(&self, now: Millis) -> bool {
        now.saturating_sub(self.armed_at) >= self.duration
    }

    /// Milliseconds left before expiry (0 once expired).
    pub fn remaining(&self, now: Millis) -> Millis {
        self.expires_at().saturating_sub(now)
    }

    /// Restart the window at `now`, keeping the duration.
    pub fn rearm(&mut self, now: Millis) {
        self.armed_at = now;
    }
}

/// Fixed-interval gate: fires at most once per `interval`.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    deadline: Deadline,
}

impl Cadence {
    pub const fn new(now: Millis, interval: Millis) -> Self {
        Self {
            deadline: Deadline::new(now, interval),
        }
    }

    /// Returns `true` and re-arms if the interval has elapsed.
    pub fn ready(&mut self, now: Millis) -> bool {
        if self.deadline.is_expired(now) {
            self.deadline.rearm(now);
            true
        } else {
            false
        }
    }

    /// Push the next firing out to a full interval from `now`.
    pub fn restart(&mut self, now: Millis) {
        self.deadline.rearm(now);
    }

    pub fn interval(&self) -> Millis {
        self.deadline.duration()
    }
}
