//! Fuzz target: `RigService::tick`
//!
//! Interprets the input as a stream of 6-byte records (4-byte code,
//! repeat flag, time gap) pushed through the IR frame ring and polled by
//! the service, and asserts that every output stays in range.
//!
//! cargo fuzz run fuzz_remote_frames

#![no_main]

use irservo::adapters::display::LogDisplay;
use irservo::adapters::ir::{IrFrameRing, IrReceiver};
use irservo::adapters::log_sink::LogEventSink;
use irservo::app::commands::IrFrame;
use irservo::app::ports::{ActuatorPort, RemotePort, ServoId};
use irservo::app::service::RigService;
use irservo::config::RigConfig;
use irservo::control::relay::RelayId;
use irservo::timing::Millis;
use libfuzzer_sys::fuzz_target;

/// Ring-backed remote whose outputs are range-checked on every write.
struct CheckedRig<'a> {
    remote: IrReceiver<'a>,
    lower: u8,
    upper: u8,
}

impl RemotePort for CheckedRig<'_> {
    fn try_receive(&mut self) -> Option<IrFrame> {
        self.remote.try_receive()
    }

    fn is_idle(&self, now: Millis) -> bool {
        self.remote.is_idle(now)
    }

    fn acknowledge(&mut self) {
        self.remote.acknowledge();
    }
}

impl ActuatorPort for CheckedRig<'_> {
    fn set_servo_angle(&mut self, servo: ServoId, degrees: u8) {
        match servo {
            ServoId::Positional => {
                assert!(degrees >= self.lower && degrees <= self.upper, "positional out of range");
            }
            ServoId::Rotational => assert!(degrees <= 180, "rotational out of range"),
        }
    }

    fn set_relay(&mut self, _relay: RelayId, _on: bool) {}
}

fuzz_target!(|data: &[u8]| {
    let config = RigConfig::default();
    let ring = IrFrameRing::new();
    let mut rig = CheckedRig {
        remote: IrReceiver::new(&ring, config.remote_idle_ms),
        lower: config.positional_lower as u8,
        upper: config.positional_upper as u8,
    };
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let Ok(mut app) = RigService::new(config) else {
        return;
    };
    if app.start(&mut rig, &mut display, &mut sink).is_err() {
        return;
    }

    let mut now: Millis = 0;
    for record in data.chunks_exact(6) {
        let code = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        let is_repeat = record[4] & 1 == 1;
        now += Millis::from(record[5]) * 4;
        ring.push(IrFrame { code, is_repeat }, now as u32);
        app.tick(now, &mut rig, &mut display, &mut sink);
    }

    // Drain whatever is left and let every timer run out.
    for _ in 0..16 {
        now += 1_000;
        app.tick(now, &mut rig, &mut display, &mut sink);
    }
    assert!(ring.is_empty());
    assert!(!app.state().timed_relay.is_on(), "timed relay outlived its window");
    assert!(app.state().rotational.is_stopped(), "rotation did not self-center");
});
