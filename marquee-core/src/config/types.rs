//! Configuration type definitions
//!
//! Constants in this module are fixed properties of the appliance and are
//! not runtime-configurable. [`BoardConfig`] holds the options that vary
//! between builds and are read from `board.toml` at start-up.

use heapless::String;
use marquee_hal::{DataBits, Parity, StopBits, UartConfig};

use crate::traits::DISPLAY_COLS;

/// Usable line length before the write cursor wraps to 0
pub const LINE_CAPACITY: usize = 128;

/// Spare bytes after the usable area (room for the NUL terminator)
pub const BUFFER_MARGIN: usize = 5;

/// Total receive buffer size
pub const BUFFER_SIZE: usize = LINE_CAPACITY + BUFFER_MARGIN;

/// Line terminator (carriage return)
pub const CARRIAGE_RETURN: u8 = 13;

/// Erase codes (backspace and delete)
pub const BACKSPACE: u8 = 8;
pub const DELETE: u8 = 127;

/// Serial format of the command link: 115200 baud, 8 data bits, odd parity,
/// 1 stop bit, no flow control
pub const SERIAL_CONFIG: UartConfig = UartConfig {
    baudrate: 115_200,
    data_bits: DataBits::Eight,
    parity: Parity::Odd,
    stop_bits: StopBits::One,
    hardware_flow_control: false,
};

/// Maximum banner length (one display row)
pub const MAX_BANNER_LEN: usize = DISPLAY_COLS as usize;

/// Backlight controller fitted to the LCD module
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BacklightKind {
    /// RGB backlight with a PCA9633-style LED driver
    Rgb,
    /// Monochrome backlight dimmed by an SN3193 PWM driver
    #[default]
    Pwm,
}

/// Board configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardConfig {
    /// Echo received and erased characters back out the UART
    pub echo: bool,
    /// Display row that mirrors received lines
    pub message_row: u8,
    /// Text shown on the other row at boot
    pub banner: String<MAX_BANNER_LEN>,
    /// Backlight controller variant
    pub backlight: BacklightKind,
    /// Initial backlight brightness (0-255)
    pub brightness: u8,
    /// Number of LED blinks at boot
    pub boot_blinks: u8,
    /// Dispatch loop tick in milliseconds
    pub poll_interval_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let mut banner = String::new();
        let _ = banner.push_str("Marquee ready");
        Self {
            echo: false,
            message_row: 1,
            banner,
            backlight: BacklightKind::Pwm,
            brightness: 100,
            boot_blinks: 5,
            poll_interval_ms: 10,
        }
    }
}

impl BoardConfig {
    /// Row used for the banner (the one not used for messages)
    pub fn banner_row(&self) -> u8 {
        if self.message_row == 0 {
            1
        } else {
            0
        }
    }
}
