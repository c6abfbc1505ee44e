//! Board-agnostic core logic for the Marquee firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Line receiver: byte accumulator shared between the UART receive path
//!   and the main loop
//! - Command parsing for the text protocol
//! - Dispatcher that turns completed lines into indicator and display output
//! - Display trait implemented by the LCD driver
//! - Board configuration types and the `board.toml` parser

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod dispatch;
pub mod line;
pub mod traits;

pub use command::Command;
pub use dispatch::{Dispatch, Dispatcher};
pub use line::{Feed, Line, LineReceiver};
pub use traits::{DisplayError, TextDisplay};
