//! Integration tests for the RigService → models → actuators pipeline.
//!
//! These run on the host (x86_64) and drive whole polling iterations:
//! IR frames go in through the mock remote, and servo/relay writes,
//! readout frames and events come out.

use super::mock_hw::{MockDisplay, MockRig, RecordingSink};

use irservo::app::commands::{CodeTable, Command, IrFrame, RemoteCode};
use irservo::app::events::AppEvent;
use irservo::app::ports::{DisplayError, ServoId};
use irservo::app::service::RigService;
use irservo::config::{ResetBinding, RigConfig};
use irservo::control::relay::RelayId;
use irservo::control::rotational::DriveMode;
use irservo::error::Error;
use irservo::timing::Millis;

/// NEC repeat frames carry no key code.
const REPEAT_CODE: RemoteCode = 0xFFFF_FFFF;

struct Bench {
    app: RigService,
    rig: MockRig,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Bench {
    fn new() -> Self {
        Self::with_config(RigConfig::default())
    }

    fn with_config(config: RigConfig) -> Self {
        let idle = config.remote_idle_ms;
        let mut bench = Self {
            app: RigService::new(config).unwrap(),
            rig: MockRig::new(idle),
            display: MockDisplay::new(),
            sink: RecordingSink::new(),
        };
        bench
            .app
            .start(&mut bench.rig, &mut bench.display, &mut bench.sink)
            .unwrap();
        bench
    }

    fn tick(&mut self, now: Millis) {
        self.app
            .tick(now, &mut self.rig, &mut self.display, &mut self.sink);
    }

    /// Fresh press of `command`, processed in the same iteration.
    fn press(&mut self, command: Command, now: Millis) {
        let code = CodeTable::default().code_for(command).unwrap();
        self.rig.push(IrFrame::press(code), now);
        self.tick(now);
    }

    /// Repeat frame (key still held), processed in the same iteration.
    fn repeat(&mut self, now: Millis) {
        self.rig.push(IrFrame::repeat(REPEAT_CODE), now);
        self.tick(now);
    }

    /// Tick every `step` ms over `[from, to]`.
    fn run(&mut self, from: Millis, to: Millis, step: Millis) {
        let mut t = from;
        while t <= to {
            self.tick(t);
            t += step;
        }
    }

    fn position(&self) -> i16 {
        self.app.state().positional.position()
    }
}

// ── Start-up ──────────────────────────────────────────────────

#[test]
fn start_drives_outputs_to_rest_and_draws_once() {
    let bench = Bench::new();
    assert_eq!(bench.rig.servo_angle(ServoId::Positional), Some(92));
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(90));
    assert!(!bench.rig.relay_on(RelayId::Timed));
    assert!(!bench.rig.relay_on(RelayId::Toggle));
    assert_eq!(bench.display.frames.len(), 1);
    assert!(matches!(bench.sink.events[0], AppEvent::Started(_)));
}

#[test]
fn display_that_fails_to_init_is_fatal() {
    let mut app = RigService::new(RigConfig::default()).unwrap();
    let mut rig = MockRig::new(150);
    let mut display = MockDisplay::broken();
    let mut sink = RecordingSink::new();
    let err = app.start(&mut rig, &mut display, &mut sink).unwrap_err();
    assert_eq!(err, Error::Display(DisplayError::NotResponding));
    assert!(display.frames.is_empty());
    assert!(sink.events.is_empty());
}

// ── Positional servo ──────────────────────────────────────────

#[test]
fn up_press_moves_one_step_and_redraws() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 10);
    assert_eq!(bench.position(), 93);
    assert_eq!(bench.rig.servo_angle(ServoId::Positional), Some(93));
    assert_eq!(bench.rig.acknowledged, 1);
    assert_eq!(bench.display.frames.len(), 2);
    assert!(bench.display.last().unwrap().angle > 90);
}

#[test]
fn sixty_up_presses_saturate_at_upper_bound() {
    let mut bench = Bench::new();
    for i in 0..60 {
        bench.press(Command::Up, i * 400);
    }
    assert_eq!(bench.position(), 142);
    assert_eq!(bench.rig.servo_angle(ServoId::Positional), Some(142));
    assert_eq!(bench.display.last().unwrap().angle, 180);
}

#[test]
fn down_presses_saturate_at_lower_bound() {
    let mut bench = Bench::new();
    for i in 0..80 {
        bench.press(Command::Down, i * 400);
    }
    assert_eq!(bench.position(), 45);
    assert_eq!(bench.display.last().unwrap().angle, 0);
}

#[test]
fn reset_key_returns_to_center() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    bench.press(Command::Up, 400);
    bench.press(Command::Ok, 800);
    assert_eq!(bench.position(), 92);
    assert!(!bench.rig.relay_on(RelayId::Timed));
}

#[test]
fn star_binding_swaps_reset_and_relay_keys() {
    let mut bench = Bench::with_config(RigConfig {
        reset_binding: ResetBinding::Star,
        ..RigConfig::default()
    });
    bench.press(Command::Up, 0);
    bench.press(Command::Ok, 400);
    assert_eq!(bench.position(), 93, "Ok no longer resets");
    assert!(bench.rig.relay_on(RelayId::Timed));
    bench.press(Command::Star, 800);
    assert_eq!(bench.position(), 92);
}

// ── Hold-to-repeat ────────────────────────────────────────────

#[test]
fn held_up_repeats_at_fixed_interval_until_release() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    // Remote sends repeat frames every 110 ms while held; loop polls every 10 ms.
    let mut t = 10;
    while t <= 1_000 {
        if t % 110 == 0 {
            bench.repeat(t);
        } else {
            bench.tick(t);
        }
        t += 10;
    }
    // Press + re-fires at 300, 600, 900.
    assert_eq!(bench.position(), 96);
    assert_eq!(
        bench.sink.count(|e| matches!(e, AppEvent::Repeated(Command::Up))),
        3
    );

    // Released: the receiver goes idle and nothing more fires.
    bench.run(1_010, 3_000, 10);
    assert_eq!(bench.position(), 96);
}

#[test]
fn held_up_with_idle_receiver_does_not_repeat() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    bench.run(10, 2_000, 10);
    assert_eq!(bench.position(), 93);
}

#[test]
fn unknown_code_clears_the_held_command() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    bench.rig.push(IrFrame::press(0x1234_5678), 50);
    bench.tick(50);
    let mut t = 60;
    while t <= 1_000 {
        if t % 100 == 0 {
            bench.repeat(t);
        } else {
            bench.tick(t);
        }
        t += 10;
    }
    assert_eq!(bench.position(), 93);
    assert_eq!(
        bench.sink.count(|e| matches!(e, AppEvent::UnknownCode(0x1234_5678))),
        1
    );
}

// ── Rotational servo ──────────────────────────────────────────

#[test]
fn left_spins_then_self_centers_after_timeout() {
    let mut bench = Bench::new();
    bench.press(Command::Left, 1_000);
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(180));
    bench.tick(1_199);
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(180));
    bench.tick(1_200);
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(90));
    assert!(bench.app.state().rotational.is_stopped());
}

#[test]
fn other_keys_do_not_extend_rotation() {
    let mut bench = Bench::new();
    bench.press(Command::Left, 0);
    bench.press(Command::Ok, 100);
    bench.tick(199);
    assert_eq!(bench.app.state().rotational.target(), 180);
    bench.tick(200);
    assert_eq!(bench.app.state().rotational.target(), 90);
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(90));
}

#[test]
fn mixed_presses_do_not_extend_rotation() {
    let mut bench = Bench::new();
    bench.press(Command::Right, 1_000);
    bench.press(Command::Up, 1_050);
    bench.press(Command::Star, 1_100);
    bench.press(Command::Square, 1_150);
    bench.press(Command::Down, 1_199);
    assert_eq!(bench.app.state().rotational.target(), 0);
    bench.tick(1_200);
    assert_eq!(bench.app.state().rotational.target(), 90);
}

#[test]
fn right_targets_zero() {
    let mut bench = Bench::new();
    bench.press(Command::Right, 500);
    assert_eq!(bench.app.state().rotational.target(), 0);
    assert_eq!(bench.display.last().unwrap().rotation, 0);
}

#[test]
fn holding_left_keeps_spinning() {
    let mut bench = Bench::new();
    bench.press(Command::Left, 0);
    for t in [108, 216, 324] {
        bench.tick(t - 1);
        bench.repeat(t);
    }
    bench.tick(523);
    assert_eq!(bench.app.state().rotational.target(), 180);
    bench.tick(524);
    assert_eq!(bench.app.state().rotational.target(), 90);
}

#[test]
fn command_in_timeout_iteration_wins() {
    let mut bench = Bench::new();
    bench.press(Command::Left, 0);
    let before = bench.rig.servo_writes(ServoId::Rotational).len();
    bench.press(Command::Left, 200);
    let writes = bench.rig.servo_writes(ServoId::Rotational);
    assert_eq!(&writes[before..], &[180]);
    assert_eq!(bench.app.state().rotational.target(), 180);
}

#[test]
fn smoothed_drive_never_jumps_more_than_one_step() {
    let mut bench = Bench::with_config(RigConfig {
        rotation_drive: DriveMode::Smoothed,
        command_timeout_ms: 1_000,
        ..RigConfig::default()
    });
    bench.press(Command::Left, 0);
    bench.run(1, 400, 1);
    let writes = bench.rig.servo_writes(ServoId::Rotational);
    for pair in writes.windows(2) {
        assert!(pair[0].abs_diff(pair[1]) <= 10, "jump {:?}", pair);
    }
    assert_eq!(bench.rig.servo_angle(ServoId::Rotational), Some(180));
    // Readout shows the target straight away.
    assert_eq!(bench.display.frames[1].rotation, 180);
}

// ── Relays ────────────────────────────────────────────────────

#[test]
fn timed_relay_stays_on_for_default_duration() {
    let mut bench = Bench::new();
    bench.press(Command::Star, 1_000);
    assert!(bench.rig.relay_on(RelayId::Timed));
    assert!(bench.display.last().unwrap().relay1);

    bench.tick(10_999);
    assert!(bench.rig.relay_on(RelayId::Timed));
    bench.tick(11_000);
    assert!(!bench.rig.relay_on(RelayId::Timed));
    assert!(!bench.display.last().unwrap().relay1);
    assert!(bench.sink.events.contains(&AppEvent::RelayChanged {
        relay: RelayId::Timed,
        on: false,
        until: None,
    }));
}

#[test]
fn timed_relay_retrigger_extends_from_now() {
    let mut bench = Bench::new();
    bench.press(Command::Star, 0);
    bench.press(Command::Star, 8_000);
    assert!(
        bench
            .sink
            .events
            .contains(&AppEvent::RelayExtended { until: 13_000 })
    );
    bench.tick(12_999);
    assert!(bench.rig.relay_on(RelayId::Timed));
    bench.tick(13_000);
    assert!(!bench.rig.relay_on(RelayId::Timed));
}

#[test]
fn rapid_timed_triggers_do_not_stack() {
    let mut bench = Bench::new();
    for i in 0..20 {
        bench.press(Command::Star, i * 50);
    }
    // Last trigger at 950: bound is max(10 000, 950 + 5 000).
    assert_eq!(bench.app.state().timed_relay.expires_at(), Some(10_000));
    // The coil is energised once, not per trigger.
    assert_eq!(bench.rig.relay_writes(RelayId::Timed), 2);
}

#[test]
fn toggle_relay_flips_once_per_physical_press() {
    let mut bench = Bench::new();
    bench.press(Command::Square, 0);
    assert!(bench.rig.relay_on(RelayId::Toggle));
    // Held: repeat frames must not flip it again.
    for t in [108, 216, 324, 432] {
        bench.repeat(t);
    }
    assert!(bench.rig.relay_on(RelayId::Toggle));

    bench.press(Command::Square, 1_000);
    assert!(!bench.rig.relay_on(RelayId::Toggle));
    assert!(!bench.display.last().unwrap().relay2);
}

#[test]
fn toggle_press_inside_lockout_is_ignored() {
    let mut bench = Bench::new();
    bench.press(Command::Square, 0);
    bench.press(Command::Square, 150);
    assert!(bench.rig.relay_on(RelayId::Toggle));
    assert_eq!(bench.sink.count(|e| *e == AppEvent::ToggleIgnored), 1);
    bench.press(Command::Square, 200);
    assert!(!bench.rig.relay_on(RelayId::Toggle));
}

// ── Readout gate ──────────────────────────────────────────────

#[test]
fn idle_loop_never_redraws() {
    let mut bench = Bench::new();
    bench.run(0, 5_000, 1);
    assert_eq!(bench.display.frames.len(), 1);
    assert_eq!(bench.app.iterations(), 5_001);
}

#[test]
fn each_visible_change_redraws_exactly_once() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    bench.run(1, 100, 1);
    bench.press(Command::Square, 200);
    bench.run(201, 300, 1);
    assert_eq!(bench.display.frames.len(), 3);
    assert_eq!(
        bench
            .sink
            .count(|e| matches!(e, AppEvent::DisplayRefreshed(_))),
        2
    );
}

#[test]
fn every_frame_is_acknowledged() {
    let mut bench = Bench::new();
    bench.press(Command::Up, 0);
    bench.repeat(108);
    bench.rig.push(IrFrame::press(0xDEAD_BEEF), 200);
    bench.tick(200);
    assert_eq!(bench.rig.acknowledged, 3);
    assert_eq!(bench.rig.pending(), 0);
}
