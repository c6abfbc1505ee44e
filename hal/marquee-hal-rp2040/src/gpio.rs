//! GPIO output wrapper

use embassy_rp::gpio::{Level, Output};
use marquee_core::config::PinConfig;
use marquee_hal::OutputPin;

/// Maximum number of GPIO pins on RP2040
pub const GPIO_COUNT: u8 = 30;

/// Push-pull output with optional active-low inversion
///
/// `set_high` means "asserted": for an inverted pin it drives the pad low.
pub struct Rp2040Output<'d> {
    pin: Output<'d>,
    inverted: bool,
}

impl<'d> Rp2040Output<'d> {
    /// Wrap an embassy output that starts deasserted
    pub fn new(pin: Output<'d>, config: PinConfig) -> Self {
        let mut out = Self {
            pin,
            inverted: config.inverted,
        };
        out.set_low();
        out
    }

    /// Level to put on the pad for a given logical state
    pub fn level_for(asserted: bool, inverted: bool) -> Level {
        if asserted != inverted {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl OutputPin for Rp2040Output<'_> {
    fn set_high(&mut self) {
        self.pin.set_level(Self::level_for(true, self.inverted));
    }

    fn set_low(&mut self) {
        self.pin.set_level(Self::level_for(false, self.inverted));
    }

    fn toggle(&mut self) {
        self.pin.toggle();
    }

    fn is_set_high(&self) -> bool {
        self.pin.is_set_high() != self.inverted
    }
}
