//! Character display trait for the 16x2 LCD

/// Number of visible character cells per row
pub const DISPLAY_COLS: u8 = 16;

/// Number of character rows
pub const DISPLAY_ROWS: u8 = 2;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transaction failed (NACK, arbitration loss, ...)
    Bus,
    /// Row or column outside the panel
    InvalidPosition,
}

/// Trait for a text-mode character display
///
/// Every call is a sequence of blocking bus writes. Text longer than the
/// row is cut off by the implementation; callers never have to truncate.
pub trait TextDisplay {
    /// Blank a row and leave the cursor at its first column
    fn clear_line(&mut self, row: u8) -> Result<(), DisplayError>;

    /// Write text at the current cursor position
    ///
    /// Stops at the first NUL byte or after [`DISPLAY_COLS`] characters,
    /// whichever comes first. Bytes are sent as-is (no UTF-8 decoding).
    fn print(&mut self, text: &[u8]) -> Result<(), DisplayError>;

    /// Move the cursor
    ///
    /// - `row`: Row number (0-1)
    /// - `col`: Column number (0-15)
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;
}

/// Helper for whole-row updates
pub trait TextDisplayExt: TextDisplay {
    /// Replace the content of a row
    fn show_line(&mut self, row: u8, text: &[u8]) -> Result<(), DisplayError> {
        self.clear_line(row)?;
        self.print(text)
    }
}

// Blanket implementation for all TextDisplay types
impl<T: TextDisplay> TextDisplayExt for T {}
