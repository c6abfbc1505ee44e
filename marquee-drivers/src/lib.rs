//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in marquee-core for the display module fitted to the board:
//!
//! - Character LCD (AiP31068-class controller over I2C)
//! - Backlight controllers (RGB LED driver, SN3193 PWM driver)
//!
//! Everything is written against `embedded-hal` 1.0 blocking I2C and
//! delay traits, so the drivers run unchanged on the host in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod backlight;
pub mod lcd;

#[cfg(test)]
mod mock;

pub use backlight::{Backlight, LedMode};
pub use lcd::CharacterLcd;
