//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the control rules for the rig: remote command
//! decoding, the controller state aggregate, readout gating and the
//! per-iteration service.  All interaction with hardware happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod commands;
pub mod decoder;
pub mod display;
pub mod events;
pub mod ports;
pub mod service;
pub mod state;
