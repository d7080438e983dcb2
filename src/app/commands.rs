//! Inbound commands and their wire encoding.
//!
//! The command set is one byte wide and has one member. Anything that is
//! not the sentinel decodes to `None` and is discarded by the controller.

use heapless::Vec;

use crate::error::{Error, Result};

/// Largest request [`encode_reset_request`] will build.
pub const MAX_REQUEST_BYTES: usize = 64;

/// Byte appended after the last sentinel so the controller's RX guard is
/// satisfied. It never decodes to a command.
pub const PAD_BYTE: u8 = 0x00;

/// Commands that the serial peer can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pull the reset line LOW for the configured width, then release it.
    ResetPulse,
}

impl Command {
    /// Decode one received byte against the configured sentinel.
    pub fn decode(byte: u8, sentinel: u8) -> Option<Self> {
        (byte == sentinel).then_some(Self::ResetPulse)
    }
}

/// Build the host-side byte sequence that produces exactly `count` pulses.
///
/// The controller only reads while more than one byte is buffered, so a
/// trailing sentinel would sit unread. One pad byte after the run of
/// sentinels releases it; the pad itself stays buffered until the next
/// request and is discarded then.
pub fn encode_reset_request(count: usize, sentinel: u8) -> Result<Vec<u8, MAX_REQUEST_BYTES>> {
    if sentinel == PAD_BYTE {
        return Err(Error::Config("sentinel collides with pad byte"));
    }
    if count >= MAX_REQUEST_BYTES {
        return Err(Error::Config("reset request too long"));
    }

    let mut out = Vec::new();
    if count == 0 {
        return Ok(out);
    }
    for _ in 0..count {
        out.push(sentinel).map_err(|_| Error::Config("reset request too long"))?;
    }
    out.push(PAD_BYTE).map_err(|_| Error::Config("reset request too long"))?;
    Ok(out)
}
