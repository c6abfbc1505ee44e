//! I2C support
//!
//! Both I2C blocks can reach most GPIOs: the controller alternates every
//! two pins (I2C0 on 0-1, I2C1 on 2-3, ...), SDA on the even pin and SCL
//! on the odd one.

use embassy_rp::i2c;
use marquee_hal::I2cConfig;

use crate::gpio::GPIO_COUNT;

/// I2C peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum I2cId {
    I2c0,
    I2c1,
}

fn gpio_to_i2c(gpio: u8) -> Option<I2cId> {
    if gpio >= GPIO_COUNT {
        return None;
    }
    Some(if (gpio / 2) % 2 == 0 {
        I2cId::I2c0
    } else {
        I2cId::I2c1
    })
}

/// I2C block that can use `sda` and `scl`, if both belong to the same one
pub fn i2c_for_pins(sda: u8, scl: u8) -> Option<I2cId> {
    if sda % 2 != 0 || scl % 2 != 1 {
        return None;
    }
    let id = gpio_to_i2c(sda)?;
    (gpio_to_i2c(scl)? == id).then_some(id)
}

/// Map a bus config onto embassy-rp's I2C config
pub fn embassy_config(config: &I2cConfig) -> i2c::Config {
    let mut out = i2c::Config::default();
    out.frequency = config.frequency;
    out
}
