//! Backlight controllers
//!
//! Display modules ship with one of two backlight chips on the same I2C
//! bus as the LCD controller. Which one is fitted is a board option
//! ([`BacklightKind`]) and is resolved once at start-up.

pub mod rgb;
pub mod sn3193;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use marquee_core::config::BacklightKind;

pub use rgb::RgbBacklight;
pub use sn3193::PwmBacklight;

/// Backlight animation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    /// Steady output at the set brightness
    #[default]
    Normal,
    /// Hardware breathing / blinking
    Breathing,
}

/// Fitted backlight controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backlight {
    Rgb(RgbBacklight),
    Pwm(PwmBacklight),
}

impl From<BacklightKind> for Backlight {
    fn from(kind: BacklightKind) -> Self {
        match kind {
            BacklightKind::Rgb => Backlight::Rgb(RgbBacklight),
            BacklightKind::Pwm => Backlight::Pwm(PwmBacklight),
        }
    }
}

impl Backlight {
    pub fn kind(&self) -> BacklightKind {
        match self {
            Backlight::Rgb(_) => BacklightKind::Rgb,
            Backlight::Pwm(_) => BacklightKind::Pwm,
        }
    }

    pub fn init<I2C: I2c, D: DelayNs>(&self, i2c: &mut I2C, delay: &mut D) -> Result<(), I2C::Error> {
        match self {
            Backlight::Rgb(rgb) => rgb.init(i2c),
            Backlight::Pwm(pwm) => pwm.init(i2c, delay),
        }
    }

    pub fn set_brightness<I2C: I2c, D: DelayNs>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        level: u8,
    ) -> Result<(), I2C::Error> {
        match self {
            Backlight::Rgb(rgb) => rgb.set_brightness(i2c, level),
            Backlight::Pwm(pwm) => pwm.set_brightness(i2c, delay, level),
        }
    }

    pub fn set_mode<I2C: I2c>(&self, i2c: &mut I2C, mode: LedMode) -> Result<(), I2C::Error> {
        match self {
            Backlight::Rgb(rgb) => rgb.set_breathing(i2c, mode == LedMode::Breathing),
            Backlight::Pwm(pwm) => pwm.set_mode(i2c, mode),
        }
    }

    /// Set a colour; monochrome backlights take the brightest channel
    pub fn set_rgb<I2C: I2c, D: DelayNs>(
        &self,
        i2c: &mut I2C,
        delay: &mut D,
        red: u8,
        green: u8,
        blue: u8,
    ) -> Result<(), I2C::Error> {
        match self {
            Backlight::Rgb(rgb) => rgb.set_rgb(i2c, red, green, blue),
            Backlight::Pwm(pwm) => pwm.set_brightness(i2c, delay, red.max(green).max(blue)),
        }
    }
}
