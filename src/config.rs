//! System configuration parameters
//!
//! All tunable parameters for the resetter. There is no persistent store:
//! the defaults below are the configuration, and `main` logs them as JSON
//! at boot so a serial capture records what the board was running.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pins;

/// Command byte that requests a reset pulse.
pub const SENTINEL: u8 = 0x33;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetterConfig {
    // --- Output ---
    /// LOW phase of a reset pulse (milliseconds)
    pub pulse_width_ms: u32,

    // --- Serial ---
    /// UART baud rate
    pub baud_rate: u32,
    /// Byte value that triggers a pulse
    pub sentinel: u8,
    /// A byte is consumed only when strictly more than this many are buffered.
    ///
    /// The default of 1 means a lone byte waits for a second one to arrive
    /// before it is evaluated. Hosts that need a pulse right away send a
    /// trailing pad byte (see [`encode_reset_request`]).
    ///
    /// [`encode_reset_request`]: crate::app::commands::encode_reset_request
    pub rx_guard_bytes: usize,
}

impl Default for ResetterConfig {
    fn default() -> Self {
        Self {
            // Output
            pulse_width_ms: 10,

            // Serial
            baud_rate: 9600,
            sentinel: SENTINEL,
            rx_guard_bytes: 1,
        }
    }
}

impl ResetterConfig {
    /// Upper bound on the pulse width. Anything longer stalls the poll loop
    /// long enough to overflow the RX ring at 9600 baud.
    pub const MAX_PULSE_WIDTH_MS: u32 = 50;

    /// Reject values the controller cannot operate with.
    pub fn validate(&self) -> Result<()> {
        if self.pulse_width_ms == 0 {
            return Err(Error::Config("pulse_width_ms must be non-zero"));
        }
        if self.pulse_width_ms > Self::MAX_PULSE_WIDTH_MS {
            return Err(Error::Config("pulse_width_ms exceeds 50 ms"));
        }
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be non-zero"));
        }
        // A guard at or above the driver's RX ring size can never be
        // exceeded, so no byte would ever be read.
        if self.rx_guard_bytes >= pins::UART_RX_BUFFER_BYTES {
            return Err(Error::Config("rx_guard_bytes must be below the UART RX buffer size"));
        }
        Ok(())
    }
}
