//! IrServo Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogDisplay    LogEventSink  Monotonic  │
//! │  (Actuator + Remote)    (Display)     (EventSink)   (Clock)    │
//! │        ▲                                                       │
//! │  IR decoder ISR ──▶ IR_FRAMES ring                             │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              RigService (pure logic)                   │    │
//! │  │  Decoder · RepeatScheduler · Servos · Relays · Gate    │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The IR decoder publishes frames with
//! [`push_ir_frame`](irservo::adapters::ir::push_ir_frame); this loop
//! never blocks on it.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyOutputPin, PinDriver};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{error, info};

use irservo::adapters::display::LogDisplay;
use irservo::adapters::hardware::HardwareAdapter;
use irservo::adapters::ir::{IR_FRAMES, IrReceiver};
use irservo::adapters::log_sink::LogEventSink;
use irservo::adapters::time::MonotonicClock;
use irservo::app::ports::ClockPort;
use irservo::app::service::RigService;
use irservo::config::RigConfig;
use irservo::drivers::relay::RelayDriver;
use irservo::drivers::servo::ServoDriver;
use irservo::error::Error;
use irservo::pins;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  IrServo v{}                          ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = RigConfig::default();
    let peripherals = Peripherals::take()?;

    // ── 2. Servo PWM (LEDC, 50 Hz, 14-bit) ────────────────────
    let servo_timer = LedcTimerDriver::new(
        peripherals.ledc.timer0,
        &TimerConfig::default()
            .frequency(pins::SERVO_PWM_FREQ_HZ.Hz())
            .resolution(Resolution::Bits14),
    )?;
    // SAFETY: every GPIO below is claimed exactly once, here.
    let positional_pwm = LedcDriver::new(peripherals.ledc.channel0, &servo_timer, unsafe {
        AnyOutputPin::new(pins::SERVO_180_GPIO)
    })?;
    let rotational_pwm = LedcDriver::new(peripherals.ledc.channel1, &servo_timer, unsafe {
        AnyOutputPin::new(pins::SERVO_360_GPIO)
    })?;

    // ── 3. Relay outputs ──────────────────────────────────────
    let timed_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::RELAY_TIMED_GPIO) })?;
    let toggle_pin = PinDriver::output(unsafe { AnyOutputPin::new(pins::RELAY_TOGGLE_GPIO) })?;

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(
        ServoDriver::new(positional_pwm),
        ServoDriver::new(rotational_pwm),
        RelayDriver::new(timed_pin, pins::RELAY_POLARITY).map_err(|e| {
            error!("RELAY | timed output init failed: {:?}", e);
            Error::Init("timed relay output")
        })?,
        RelayDriver::new(toggle_pin, pins::RELAY_POLARITY).map_err(|e| {
            error!("RELAY | toggle output init failed: {:?}", e);
            Error::Init("toggle relay output")
        })?,
        IrReceiver::new(&IR_FRAMES, config.remote_idle_ms),
    );
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();
    let clock = MonotonicClock::new();
    // The receiver is not wired here. A board decoder (RMT channel or GPIO
    // edge ISR on IR_RX_GPIO) hooks in by calling `push_ir_frame` with each
    // finished NEC frame; until one is installed the ring stays empty.
    info!("IR decoder input on GPIO {}", pins::IR_RX_GPIO);

    // ── 5. App service ────────────────────────────────────────
    let poll_ms = config.poll_interval_ms;
    let mut app = RigService::new(config)?;
    if let Err(e) = app.start(&mut hw, &mut display, &mut sink) {
        // Unusable without the readout; needs physical intervention.
        error!("Start-up failed: {}, halting", e);
        loop {
            FreeRtos::delay_ms(1_000);
        }
    }

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    loop {
        let now = clock.now_ms();
        app.tick(now, &mut hw, &mut display, &mut sink);
        // Yield to the RTOS idle task (feeds the task watchdog).
        FreeRtos::delay_ms(poll_ms);
    }
}
