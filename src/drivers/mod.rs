//! Output drivers.

pub mod reset_line;
