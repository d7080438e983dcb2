//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing controller events to the `log`
//! facade (the ESP-IDF console UART in production). Ignored bytes go out
//! at `debug` so a noisy line does not flood the console.

use log::{debug, info, warn};

use crate::app::events::ResetEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`ResetEvent`] to the console.
pub struct LogEventSink;

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &ResetEvent) {
        match event {
            ResetEvent::Started(level) => {
                info!("START | reset line {:?}", level);
            }
            ResetEvent::ByteIgnored(byte) => {
                debug!("RX    | ignored 0x{:02X}", byte);
            }
            ResetEvent::PulseEmitted { width_ms, total } => {
                info!("PULSE | #{} width={}ms", total, width_ms);
            }
            ResetEvent::PinFault(kind) => {
                warn!("FAULT | reset line write failed: {:?}", kind);
            }
        }
    }
}
