//! Port traits — the boundary between the controller and the outside world.
//!
//! ```text
//!   SerialPort ──▶ ResetController ──▶ EventSink
//!                        │
//!                        ▼
//!              OutputPin + DelayNs (embedded-hal)
//! ```
//!
//! The output pin and the pulse delay use the `embedded-hal` 1.0 traits
//! directly. `embedded-hal` has no serial abstraction that reports the RX
//! fill level, so the byte source gets its own port here.

use super::events::ResetEvent;

// ───────────────────────────────────────────────────────────────
// Serial port (driven adapter: UART → controller)
// ───────────────────────────────────────────────────────────────

/// Inbound byte stream with a queryable fill level.
pub trait SerialPort {
    /// Number of bytes currently buffered and readable without blocking.
    ///
    /// Backends that fail to answer report 0.
    fn available(&self) -> usize;

    /// Pop the oldest buffered byte, or `None` if the buffer is empty.
    fn read_byte(&mut self) -> Option<u8>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: controller → logging)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`ResetEvent`]s through this port.
/// Nothing here ever travels back over the serial link.
pub trait EventSink {
    fn emit(&mut self, event: &ResetEvent);
}

/// Sink that drops every event.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &ResetEvent) {}
}
