//! Resetter firmware library.
//!
//! Pulses a reset line LOW when the command byte `0x33` arrives on the
//! serial link. Exposes the pure-logic modules for integration testing;
//! all ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
