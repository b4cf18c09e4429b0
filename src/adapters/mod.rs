//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter        | Implements         | Connects to                 |
//! |----------------|--------------------|-----------------------------|
//! | `display`      | DisplayPort        | Serial log readout          |
//! | `hardware`     | ActuatorPort       | Servo PWM, relay GPIO       |
//! |                | RemotePort         | (delegates to `ir`)         |
//! | `ir`           | RemotePort         | IR decoder ISR frame queue  |
//! | `log_sink`     | EventSink          | Serial log output           |
//! | `time`         | ClockPort          | ESP32 system timer          |

pub mod display;
pub mod hardware;
pub mod ir;
pub mod log_sink;
pub mod time;
