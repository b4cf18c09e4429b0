//! End-to-end through the real adapters: frames pushed into an
//! `IrFrameRing` (as the decoder ISR would) come out as PWM duty and
//! relay pin levels on test doubles.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use irservo::adapters::display::LogDisplay;
use irservo::adapters::hardware::HardwareAdapter;
use irservo::adapters::ir::{IrFrameRing, IrReceiver};
use irservo::adapters::log_sink::LogEventSink;
use irservo::app::commands::{IrFrame, nec_code};
use irservo::app::ports::ServoId;
use irservo::app::service::RigService;
use irservo::config::RigConfig;
use irservo::control::relay::RelayId;
use irservo::drivers::relay::{Polarity, RelayDriver};
use irservo::drivers::servo::ServoDriver;

/// 14-bit channel sharing its last duty with the test.
struct SharedPwm(Rc<RefCell<u16>>);

impl pwm::ErrorType for SharedPwm {
    type Error = Infallible;
}

impl SetDutyCycle for SharedPwm {
    fn max_duty_cycle(&self) -> u16 {
        16_383
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        *self.0.borrow_mut() = duty;
        Ok(())
    }
}

/// Output pin sharing its level with the test.
struct SharedPin(Rc<RefCell<bool>>);

impl digital::ErrorType for SharedPin {
    type Error = Infallible;
}

impl OutputPin for SharedPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        *self.0.borrow_mut() = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        *self.0.borrow_mut() = true;
        Ok(())
    }
}

struct Board {
    positional_duty: Rc<RefCell<u16>>,
    timed_level: Rc<RefCell<bool>>,
    toggle_level: Rc<RefCell<bool>>,
}

fn board(
    ring: &IrFrameRing,
) -> (
    Board,
    HardwareAdapter<SharedPwm, SharedPin, IrReceiver<'_>>,
) {
    let b = Board {
        positional_duty: Rc::default(),
        timed_level: Rc::default(),
        toggle_level: Rc::default(),
    };
    let hw = HardwareAdapter::new(
        ServoDriver::new(SharedPwm(b.positional_duty.clone())),
        ServoDriver::new(SharedPwm(Rc::default())),
        RelayDriver::new(SharedPin(b.timed_level.clone()), Polarity::ActiveLow).unwrap(),
        RelayDriver::new(SharedPin(b.toggle_level.clone()), Polarity::ActiveHigh).unwrap(),
        IrReceiver::new(ring, 150),
    );
    (b, hw)
}

#[test]
fn frames_from_the_ring_drive_the_outputs() {
    let ring = IrFrameRing::new();
    let (b, mut hw) = board(&ring);
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let mut app = RigService::new(RigConfig::default()).unwrap();
    app.start(&mut hw, &mut display, &mut sink).unwrap();

    // Active-low relay released at rest.
    assert!(*b.timed_level.borrow());
    assert_eq!(hw.servo_angle(ServoId::Positional), Some(92));

    ring.push(IrFrame::press(nec_code(0x18)), 10); // Up
    app.tick(10, &mut hw, &mut display, &mut sink);
    assert_eq!(hw.servo_angle(ServoId::Positional), Some(93));
    // 500 + 93 * 2000 / 180 = 1533 µs of 20 ms, on a 14-bit channel.
    assert_eq!(*b.positional_duty.borrow(), 1255);

    ring.push(IrFrame::press(nec_code(0x16)), 20); // Star: timed relay
    ring.push(IrFrame::press(nec_code(0x0D)), 21); // Square: toggle relay
    app.tick(20, &mut hw, &mut display, &mut sink);
    app.tick(21, &mut hw, &mut display, &mut sink);
    assert!(ring.is_empty());
    assert!(hw.relay_is_on(RelayId::Timed));
    assert!(!*b.timed_level.borrow(), "active-low coil pulled in");
    assert!(*b.toggle_level.borrow());

    app.tick(10_020, &mut hw, &mut display, &mut sink);
    assert!(!hw.relay_is_on(RelayId::Timed));
    assert!(*b.timed_level.borrow());
    assert_eq!(display.redraws(), 5);
}

#[test]
fn one_frame_is_consumed_per_iteration() {
    let ring = IrFrameRing::new();
    let (_b, mut hw) = board(&ring);
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let mut app = RigService::new(RigConfig::default()).unwrap();
    app.start(&mut hw, &mut display, &mut sink).unwrap();

    for t in 0..3 {
        ring.push(IrFrame::press(nec_code(0x18)), t);
    }
    app.tick(5, &mut hw, &mut display, &mut sink);
    assert_eq!(ring.len(), 2);
    app.tick(6, &mut hw, &mut display, &mut sink);
    app.tick(7, &mut hw, &mut display, &mut sink);
    assert!(ring.is_empty());
    assert_eq!(app.state().positional.position(), 95);
}
