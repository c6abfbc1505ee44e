//! 16x2 character LCD over I2C
//!
//! AiP31068-class controller (HD44780 command set behind an I2C front end).
//! Every transfer is a two-byte frame: a control byte selecting the
//! command or data register, then the payload.
//!
//! ```text
//! [0x80, cmd]   instruction register
//! [0x40, byte]  data register (character at the cursor)
//! ```
//!
//! The backlight chip shares the bus, so the LCD driver owns it and the
//! backlight strategy borrows it per call.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use marquee_core::traits::{DisplayError, TextDisplay, DISPLAY_COLS, DISPLAY_ROWS};

use crate::backlight::{Backlight, LedMode};

/// 7-bit I2C address (0x7C >> 1)
pub const ADDRESS: u8 = 0x3E;

/// Control byte for an instruction
const CONTROL_COMMAND: u8 = 0x80;
/// Control byte for character data
const CONTROL_DATA: u8 = 0x40;

/// Instruction codes
pub mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const CURSOR_SHIFT: u8 = 0x10;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_CGRAM_ADDR: u8 = 0x40;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// Instruction flags
pub mod flag {
    // Entry mode
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const ENTRY_SHIFT_DECREMENT: u8 = 0x00;

    // Display control
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_OFF: u8 = 0x00;
    pub const BLINK_OFF: u8 = 0x00;

    // Function set
    pub const MODE_4BIT: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const DOTS_5X8: u8 = 0x00;
}

/// DDRAM address of the first cell of row 1
const ROW_1_OFFSET: u8 = 0x40;

const FUNCTION_FLAGS: u8 = flag::MODE_4BIT | flag::TWO_LINE | flag::DOTS_5X8;
const CONTROL_FLAGS: u8 = flag::DISPLAY_ON | flag::CURSOR_OFF | flag::BLINK_OFF;

/// Character LCD with its backlight
pub struct CharacterLcd<I2C, D> {
    i2c: I2C,
    delay: D,
    backlight: Backlight,
}

impl<I2C: I2c, D: DelayNs> CharacterLcd<I2C, D> {
    /// Wrap a bus and delay provider. Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, delay: D, backlight: Backlight) -> Self {
        Self {
            i2c,
            delay,
            backlight,
        }
    }

    /// Power-on initialisation of the controller, then the backlight
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // The controller needs the function set repeated while it settles
        for _ in 0..3 {
            self.command(cmd::FUNCTION_SET | FUNCTION_FLAGS)?;
            self.delay.delay_ms(5);
        }
        self.command(cmd::FUNCTION_SET | FUNCTION_FLAGS)?;
        self.display_on()?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | flag::ENTRY_LEFT | flag::ENTRY_SHIFT_DECREMENT)?;
        self.delay.delay_ms(20);

        self.backlight
            .init(&mut self.i2c, &mut self.delay)
            .map_err(bus_error)
    }

    /// Blank the whole panel and home the cursor
    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn display_on(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::DISPLAY_CONTROL | CONTROL_FLAGS)
    }

    pub fn set_brightness(&mut self, level: u8) -> Result<(), DisplayError> {
        self.backlight
            .set_brightness(&mut self.i2c, &mut self.delay, level)
            .map_err(bus_error)
    }

    pub fn set_breathing(&mut self, on: bool) -> Result<(), DisplayError> {
        let mode = if on { LedMode::Breathing } else { LedMode::Normal };
        self.backlight
            .set_mode(&mut self.i2c, mode)
            .map_err(bus_error)
    }

    pub fn set_rgb(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DisplayError> {
        self.backlight
            .set_rgb(&mut self.i2c, &mut self.delay, red, green, blue)
            .map_err(bus_error)
    }

    pub fn backlight(&self) -> Backlight {
        self.backlight
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(ADDRESS, &[CONTROL_COMMAND, command])
            .map_err(bus_error)
    }

    fn write_data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(ADDRESS, &[CONTROL_DATA, byte])
            .map_err(bus_error)
    }
}

impl<I2C: I2c, D: DelayNs> TextDisplay for CharacterLcd<I2C, D> {
    fn clear_line(&mut self, row: u8) -> Result<(), DisplayError> {
        self.set_cursor(row, 0)?;
        for _ in 0..DISPLAY_COLS {
            self.write_data(b' ')?;
        }
        self.set_cursor(row, 0)
    }

    fn print(&mut self, text: &[u8]) -> Result<(), DisplayError> {
        for &byte in text
            .iter()
            .take_while(|&&b| b != 0)
            .take(DISPLAY_COLS as usize)
        {
            self.write_data(byte)?;
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= DISPLAY_ROWS || col >= DISPLAY_COLS {
            return Err(DisplayError::InvalidPosition);
        }
        let offset = if row == 0 { 0 } else { ROW_1_OFFSET };
        self.command(cmd::SET_DDRAM_ADDR | (offset + col))
    }
}

fn bus_error<E: embedded_hal::i2c::Error>(_: E) -> DisplayError {
    DisplayError::Bus
}
