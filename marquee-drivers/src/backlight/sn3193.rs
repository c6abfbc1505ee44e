//! SN3193 PWM backlight driver
//!
//! Three-channel LED driver with a built-in breathing engine. Only
//! channel 1 is wired to the backlight; the timing registers are set for
//! all three so breathing looks the same on boards that wire more.
//!
//! PWM and timing registers are double-buffered: writes take effect on the
//! next write to `PWM_UPDATE` / `TIME_UPDATE` (any value).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::LedMode;

/// 7-bit I2C address
pub const ADDRESS: u8 = 0x6B;

/// Register addresses
pub mod reg {
    /// Software shutdown / channel enable
    pub const SHUTDOWN: u8 = 0x00;
    /// Breathing control
    pub const BREATHING_CONTROL: u8 = 0x01;
    /// Normal or breathing mode
    pub const LED_MODE: u8 = 0x02;
    /// Output current
    pub const CURRENT: u8 = 0x03;
    pub const PWM_1: u8 = 0x04;
    pub const PWM_2: u8 = 0x05;
    pub const PWM_3: u8 = 0x06;
    /// Latch PWM registers
    pub const PWM_UPDATE: u8 = 0x07;
    /// Start delay
    pub const T0: [u8; 3] = [0x0A, 0x0B, 0x0C];
    /// Rise and hold time
    pub const T1T2: [u8; 3] = [0x10, 0x11, 0x12];
    /// Fall and off time
    pub const T3T4: [u8; 3] = [0x16, 0x17, 0x18];
    /// Latch timing registers
    pub const TIME_UPDATE: u8 = 0x1C;
    pub const LED_CONTROL: u8 = 0x1D;
    pub const RESET: u8 = 0x2F;
}

/// SHUTDOWN value: normal operation, channels enabled
const SHUTDOWN_NORMAL: u8 = 0x20;
const MODE_NORMAL: u8 = 0x00;
const MODE_BREATH: u8 = 0x20;
const T0_VALUE: u8 = 0x40;
const T1T2_VALUE: u8 = 0x26;
const T3T4_VALUE: u8 = 0x26;
/// LED_CONTROL: channel 1 on
const CHANNEL_1: u8 = 0x01;

/// Monochrome PWM backlight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PwmBacklight;

impl PwmBacklight {
    /// Bring the chip out of shutdown at full brightness, normal mode
    pub fn init<I2C: I2c, D: DelayNs>(&self, i2c: &mut I2C, delay: &mut D) -> Result<(), I2C::Error> {
        write_reg(i2c, reg::SHUTDOWN, SHUTDOWN_NORMAL)?;
        write_reg(i2c, reg::LED_MODE, MODE_NORMAL)?;
        write_reg(i2c, reg::CURRENT, 0x00)?;
        delay.delay_ms(1);

        write_reg(i2c, reg::PWM_1, 0xFF)?;
        delay.delay_ms(1);
        write_reg(i2c, reg::PWM_UPDATE, 0x00)?;

        for (regs, value) in [
            (reg::T0, T0_VALUE),
            (reg::T1T2, T1T2_VALUE),
            (reg::T3T4, T3T4_VALUE),
        ] {
            for r in regs {
                write_reg(i2c, r, value)?;
            }
            delay.delay_ms(1);
        }

        write_reg(i2c, reg::LED_CONTROL, CHANNEL_1)?;
        write_reg(i2c, reg::TIME_UPDATE, 0x00)?;
        delay.delay_ms(1);

        self.set_mode(i2c, LedMode::Normal)
    }

    pub fn set_brightness<I2C: I2c, D: DelayNs>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        level: u8,
    ) -> Result<(), I2C::Error> {
        write_reg(i2c, reg::PWM_1, level)?;
        delay.delay_ms(1);
        write_reg(i2c, reg::PWM_UPDATE, 0x00)
    }

    pub fn set_mode<I2C: I2c>(&self, i2c: &mut I2C, mode: LedMode) -> Result<(), I2C::Error> {
        let value = match mode {
            LedMode::Normal => MODE_NORMAL,
            LedMode::Breathing => MODE_BREATH,
        };
        write_reg(i2c, reg::LED_MODE, value)
    }
}

fn write_reg<I2C: I2c>(i2c: &mut I2C, reg: u8, value: u8) -> Result<(), I2C::Error> {
    i2c.write(ADDRESS, &[reg, value])
}
