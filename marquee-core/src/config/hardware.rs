//! Board wiring
//!
//! Pin numbers for the Raspberry Pi Pico carrier. The firmware takes the
//! matching embassy peripherals by name; these numbers are used to check
//! the wiring against the RP2040 pin-function tables at start-up and for
//! logging.

use marquee_hal::I2cConfig;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number (0-29 for RP2040)
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
        }
    }
}

/// Pin assignments for the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoardPins {
    /// Command link UART TX
    pub uart_tx: PinConfig,
    /// Command link UART RX
    pub uart_rx: PinConfig,
    /// Display bus SDA
    pub i2c_sda: PinConfig,
    /// Display bus SCL
    pub i2c_scl: PinConfig,
    /// On-board LED driven by LED_ON / LED_OFF
    pub indicator: PinConfig,
}

/// Raspberry Pi Pico wiring: UART1 on GPIO8/9, I2C1 on GPIO14/15, LED on GPIO25
pub const PICO_PINS: BoardPins = BoardPins {
    uart_tx: PinConfig::new(8),
    uart_rx: PinConfig::new(9),
    i2c_sda: PinConfig::new(14),
    i2c_scl: PinConfig::new(15),
    indicator: PinConfig::new(25),
};

/// Display bus clock (the LCD and backlight controllers are standard-mode parts)
pub const DISPLAY_I2C: I2cConfig = I2cConfig::STANDARD;
