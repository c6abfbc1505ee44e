//! Text command protocol
//!
//! Commands are matched by prefix, case-sensitively, against the start of a
//! completed line. Anything after the keyword is ignored, so `LED_ON now`
//! still switches the indicator on. Lines that match no keyword are plain
//! text and are only shown on the display.

/// Keyword that switches the indicator on
pub const LED_ON: &[u8] = b"LED_ON";

/// Keyword that switches the indicator off
pub const LED_OFF: &[u8] = b"LED_OFF";

/// Action requested by a received line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Drive the indicator high
    LedOn,
    /// Drive the indicator low
    LedOff,
    /// No keyword; display only
    Text,
}

impl Command {
    /// Classify a line. `LED_ON` is checked before `LED_OFF`.
    pub fn parse(line: &[u8]) -> Self {
        if line.starts_with(LED_ON) {
            Command::LedOn
        } else if line.starts_with(LED_OFF) {
            Command::LedOff
        } else {
            Command::Text
        }
    }

    /// Indicator level this command asks for, if any
    pub fn indicator_state(self) -> Option<bool> {
        match self {
            Command::LedOn => Some(true),
            Command::LedOff => Some(false),
            Command::Text => None,
        }
    }
}
