//! Unified error types for the resetter firmware.
//!
//! A single `Error` enum that every subsystem converts into. All variants
//! are `Copy` so they can be handed to the event sink without allocation.
//! None of these ever reach the serial peer; the wire protocol has no
//! error channel.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The reset output pin driver rejected a level change.
    Pin(ErrorKind),
    /// The serial backend failed to report or deliver buffered bytes.
    Serial(SerialError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl Error {
    /// Capture a HAL pin error as its portable [`ErrorKind`].
    pub fn pin(e: impl embedded_hal::digital::Error) -> Self {
        Self::Pin(e.kind())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pin(kind) => write!(f, "pin: {kind}"),
            Self::Serial(e) => write!(f, "serial: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Serial errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError {
    /// Querying the RX buffer fill level failed.
    StatusFailed(i32),
    /// A read from the RX buffer failed.
    ReadFailed(i32),
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StatusFailed(rc) => write!(f, "RX status query failed (rc={rc})"),
            Self::ReadFailed(rc) => write!(f, "RX read failed (rc={rc})"),
        }
    }
}

impl From<SerialError> for Error {
    fn from(e: SerialError) -> Self {
        Self::Serial(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
