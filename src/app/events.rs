//! Outbound controller events.
//!
//! The [`ResetController`](super::service::ResetController) emits these
//! through the [`EventSink`](super::ports::EventSink) port. They exist for
//! the debug console only.

use embedded_hal::digital::ErrorKind;

use crate::drivers::reset_line::Level;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetEvent {
    /// Initialisation finished; carries the idle level the pin was driven to.
    Started(Level),

    /// A non-command byte was consumed and discarded.
    ByteIgnored(u8),

    /// A reset pulse completed. `total` counts pulses since boot.
    PulseEmitted { width_ms: u32, total: u32 },

    /// The pin driver rejected a level change.
    PinFault(ErrorKind),
}
