//! RGB backlight on a PCA9633-class LED driver
//!
//! The three colour channels sit on individual PWM registers. Group
//! blinking (MODE2 DMBLNK) is enabled at init, so "breathing" is done by
//! the chip's group duty/frequency registers without any help from us.

use embedded_hal::i2c::I2c;

/// 7-bit I2C address (0xC0 >> 1)
pub const ADDRESS: u8 = 0x60;

/// Register addresses
pub mod reg {
    pub const MODE1: u8 = 0x00;
    pub const MODE2: u8 = 0x01;
    pub const BLUE: u8 = 0x02;
    pub const GREEN: u8 = 0x03;
    pub const RED: u8 = 0x04;
    /// Group duty cycle
    pub const GROUP_PWM: u8 = 0x06;
    /// Group blink period
    pub const GROUP_FREQ: u8 = 0x07;
    /// LED output state (individual + group control)
    pub const OUTPUT: u8 = 0x08;
}

/// MODE2 value: group control is blinking
const MODE2_GROUP_BLINK: u8 = 0x20;

/// Blink period of roughly one second
const BREATH_FREQ: u8 = 0x17;
/// Half duty during a blink period
const BREATH_DUTY: u8 = 0x7F;

/// RGB backlight controller
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RgbBacklight;

impl RgbBacklight {
    /// Wake the chip, route all outputs through PWM, and go white
    pub fn init<I2C: I2c>(&self, i2c: &mut I2C) -> Result<(), I2C::Error> {
        write_reg(i2c, reg::MODE1, 0x00)?;
        write_reg(i2c, reg::OUTPUT, 0xFF)?;
        write_reg(i2c, reg::MODE2, MODE2_GROUP_BLINK)?;
        self.set_rgb(i2c, 0xFF, 0xFF, 0xFF)
    }

    pub fn set_rgb<I2C: I2c>(
        &self,
        i2c: &mut I2C,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), I2C::Error> {
        write_reg(i2c, reg::RED, red)?;
        write_reg(i2c, reg::GREEN, green)?;
        write_reg(i2c, reg::BLUE, blue)
    }

    /// Brightness as a grey level
    pub fn set_brightness<I2C: I2c>(&self, i2c: &mut I2C, level: u8) -> Result<(), I2C::Error> {
        self.set_rgb(i2c, level, level, level)
    }

    pub fn set_breathing<I2C: I2c>(&self, i2c: &mut I2C, on: bool) -> Result<(), I2C::Error> {
        if on {
            write_reg(i2c, reg::GROUP_FREQ, BREATH_FREQ)?;
            write_reg(i2c, reg::GROUP_PWM, BREATH_DUTY)
        } else {
            write_reg(i2c, reg::GROUP_FREQ, 0x00)?;
            write_reg(i2c, reg::GROUP_PWM, 0xFF)
        }
    }
}

fn write_reg<I2C: I2c>(i2c: &mut I2C, reg: u8, value: u8) -> Result<(), I2C::Error> {
    i2c.write(ADDRESS, &[reg, value])
}
