//! Actuator motion models — pure state, no I/O.
//!
//! Each model owns its own deadlines and reports whether a call changed
//! anything, so the service knows when outputs and the readout need work.

pub mod positional;
pub mod relay;
pub mod rotational;
