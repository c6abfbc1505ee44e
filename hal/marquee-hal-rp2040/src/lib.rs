//! RP2040-specific HAL for the Marquee firmware
//!
//! This crate provides RP2040-specific implementations of the shared
//! `marquee-hal` traits, plus RP2040-specific functionality:
//!
//! - GPIO output wrapper for the command indicator
//! - UART frame format mapping and the blocking echo transmitter
//! - UART and I2C pin-function tables

#![no_std]

pub mod gpio;
pub mod i2c;
pub mod uart;

pub use gpio::Rp2040Output;
pub use uart::EchoTx;
