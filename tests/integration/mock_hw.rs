//! Mock rig adapters for integration tests.
//!
//! Records every actuator call so tests can assert on the full command
//! history without touching real GPIO/PWM registers, and lets tests
//! inject IR frames with an arrival time.

use std::collections::VecDeque;

use irservo::app::commands::IrFrame;
use irservo::app::display::DisplaySnapshot;
use irservo::app::events::AppEvent;
use irservo::app::ports::{
    ActuatorPort, DisplayError, DisplayPort, EventSink, RemotePort, ServoId,
};
use irservo::control::relay::RelayId;
use irservo::timing::Millis;

// ── Actuator call record ──────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Servo { servo: ServoId, degrees: u8 },
    Relay { relay: RelayId, on: bool },
}

// ── MockRig (remote + actuators) ──────────────────────────────

pub struct MockRig {
    pub calls: Vec<ActuatorCall>,
    queue: VecDeque<IrFrame>,
    last_frame_ms: Option<Millis>,
    idle_ms: Millis,
    pub acknowledged: usize,
}

#[allow(dead_code)]
impl MockRig {
    pub fn new(idle_ms: Millis) -> Self {
        Self {
            calls: Vec::new(),
            queue: VecDeque::new(),
            last_frame_ms: None,
            idle_ms,
            acknowledged: 0,
        }
    }

    /// A frame arrives from the remote at `now`.
    pub fn push(&mut self, frame: IrFrame, now: Millis) {
        self.queue.push_back(frame);
        self.last_frame_ms = Some(now);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Every angle written to `servo`, oldest first.
    pub fn servo_writes(&self, servo: ServoId) -> Vec<u8> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                ActuatorCall::Servo { servo: s, degrees } if *s == servo => Some(*degrees),
                _ => None,
            })
            .collect()
    }

    pub fn servo_angle(&self, servo: ServoId) -> Option<u8> {
        self.servo_writes(servo).last().copied()
    }

    /// Last level written to `relay` (off if never written).
    pub fn relay_on(&self, relay: RelayId) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                ActuatorCall::Relay { relay: r, on } if *r == relay => Some(*on),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn relay_writes(&self, relay: RelayId) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, ActuatorCall::Relay { relay: r, .. } if *r == relay))
            .count()
    }
}

impl RemotePort for MockRig {
    fn try_receive(&mut self) -> Option<IrFrame> {
        self.queue.front().copied()
    }

    fn is_idle(&self, now: Millis) -> bool {
        self.last_frame_ms
            .is_none_or(|last| now.saturating_sub(last) >= self.idle_ms)
    }

    fn acknowledge(&mut self) {
        self.queue.pop_front();
        self.acknowledged += 1;
    }
}

impl ActuatorPort for MockRig {
    fn set_servo_angle(&mut self, servo: ServoId, degrees: u8) {
        self.calls.push(ActuatorCall::Servo { servo, degrees });
    }

    fn set_relay(&mut self, relay: RelayId, on: bool) {
        self.calls.push(ActuatorCall::Relay { relay, on });
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Default)]
pub struct MockDisplay {
    pub fail_init: bool,
    pub frames: Vec<DisplaySnapshot>,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn broken() -> Self {
        Self {
            fail_init: true,
            frames: Vec::new(),
        }
    }

    pub fn last(&self) -> Option<&DisplaySnapshot> {
        self.frames.last()
    }
}

impl DisplayPort for MockDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.fail_init {
            Err(DisplayError::NotResponding)
        } else {
            Ok(())
        }
    }

    fn render(&mut self, snapshot: &DisplaySnapshot) {
        self.frames.push(*snapshot);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
