//! Interrupt-fed infrared frame queue.
//!
//! The IR decoder (interrupt or RMT callback context) hands finished
//! frames to [`push_ir_frame`]; the main loop consumes them through
//! [`IrReceiver`], which implements [`RemotePort`].
//!
//! ```text
//! ┌──────────────┐  push   ┌──────────────┐  peek/ack  ┌──────────────┐
//! │ IR decoder   │───────▶│ IrFrameRing  │──────────▶│ IrReceiver   │
//! │ (ISR)        │        │ (lock-free)  │           │ (main loop)  │
//! └──────────────┘        └──────────────┘           └──────────────┘
//! ```
//!
//! Every slot is an atomic, so the queue needs no `unsafe`: the producer
//! writes the slot before publishing `head` with `Release`, the consumer
//! reads it after loading `head` with `Acquire`.  One producer, one
//! consumer.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use log::warn;

use crate::app::commands::{IrFrame, RemoteCode};
use crate::app::ports::RemotePort;
use crate::timing::Millis;

/// Pending frame capacity (one slot is kept free to tell full from empty).
pub const IR_QUEUE_CAP: usize = 8;

/// Frame queue shared between the decoder ISR and the main loop.
pub struct IrFrameRing {
    codes: [AtomicU32; IR_QUEUE_CAP],
    repeats: [AtomicBool; IR_QUEUE_CAP],
    head: AtomicU8,
    tail: AtomicU8,
    /// Arrival time of the newest frame (ms since boot, truncated).
    last_frame_ms: AtomicU32,
    /// Set once the first frame has arrived.
    active: AtomicBool,
    dropped: AtomicU32,
}

impl IrFrameRing {
    pub const fn new() -> Self {
        Self {
            codes: [const { AtomicU32::new(0) }; IR_QUEUE_CAP],
            repeats: [const { AtomicBool::new(false) }; IR_QUEUE_CAP],
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            last_frame_ms: AtomicU32::new(0),
            active: AtomicBool::new(false),
            dropped: AtomicU32::new(0),
        }
    }

    /// Enqueue a frame.  Safe from ISR context.
    /// Returns `false` if the queue is full (frame dropped).
    ///
    /// Arrival time is recorded even for dropped frames: the receiver is
    /// demonstrably busy.
    pub fn push(&self, frame: IrFrame, now_ms: u32) -> bool {
        self.last_frame_ms.store(now_ms, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);

        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        let next = (head + 1) % IR_QUEUE_CAP as u8;
        if next == tail {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let slot = usize::from(head);
        self.codes[slot].store(frame.code, Ordering::Relaxed);
        self.repeats[slot].store(frame.is_repeat, Ordering::Relaxed);
        self.head.store(next, Ordering::Release);
        true
    }

    /// Oldest pending frame, left in place.
    pub fn peek(&self) -> Option<IrFrame> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail == head {
            return None;
        }
        let slot = usize::from(tail);
        Some(IrFrame {
            code: self.codes[slot].load(Ordering::Relaxed),
            is_repeat: self.repeats[slot].load(Ordering::Relaxed),
        })
    }

    /// Discard the oldest pending frame.  No-op when empty.
    pub fn pop(&self) {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail != head {
            self.tail
                .store((tail + 1) % IR_QUEUE_CAP as u8, Ordering::Release);
        }
    }

    pub fn len(&self) -> usize {
        let head = usize::from(self.head.load(Ordering::Acquire));
        let tail = usize::from(self.tail.load(Ordering::Relaxed));
        (head + IR_QUEUE_CAP - tail) % IR_QUEUE_CAP
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Arrival time of the newest frame, `None` before the first.
    pub fn last_frame_ms(&self) -> Option<u32> {
        self.active
            .load(Ordering::Acquire)
            .then(|| self.last_frame_ms.load(Ordering::Relaxed))
    }

    /// Frames dropped because the queue was full.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for IrFrameRing {
    fn default() -> Self {
        Self::new()
    }
}

/// The board's frame queue.
pub static IR_FRAMES: IrFrameRing = IrFrameRing::new();

/// Decoder callback: publish one received frame.
/// Call from the IR decoder's ISR with the time of reception.
pub fn push_ir_frame(code: RemoteCode, is_repeat: bool, now_ms: u32) -> bool {
    IR_FRAMES.push(IrFrame { code, is_repeat }, now_ms)
}

// ───────────────────────────────────────────────────────────────
// RemotePort adapter
// ───────────────────────────────────────────────────────────────

/// Main-loop side of an [`IrFrameRing`].
pub struct IrReceiver<'a> {
    ring: &'a IrFrameRing,
    idle_ms: u32,
    dropped_seen: u32,
}

impl<'a> IrReceiver<'a> {
    /// `idle_ms`: silence after which the receiver counts as idle.
    pub fn new(ring: &'a IrFrameRing, idle_ms: Millis) -> Self {
        Self {
            ring,
            idle_ms: u32::try_from(idle_ms).unwrap_or(u32::MAX),
            dropped_seen: 0,
        }
    }
}

impl RemotePort for IrReceiver<'_> {
    fn try_receive(&mut self) -> Option<IrFrame> {
        let dropped = self.ring.dropped();
        if dropped != self.dropped_seen {
            warn!(
                "IR | queue full, {} frame(s) dropped",
                dropped.wrapping_sub(self.dropped_seen)
            );
            self.dropped_seen = dropped;
        }
        self.ring.peek()
    }

    fn is_idle(&self, now: Millis) -> bool {
        match self.ring.last_frame_ms() {
            // Both sides use the same boot clock truncated to 32 bits.
            // An age past half the range is a frame stamped after `now`.
            Some(last) => {
                let age = (now as u32).wrapping_sub(last);
                age < u32::MAX / 2 && age >= self.idle_ms
            }
            None => true,
        }
    }

    fn acknowledge(&mut self) {
        self.ring.pop();
    }
}
