//! Configuration types
//!
//! Fixed appliance constants, board wiring, and the runtime options read
//! from the `board.toml` embedded in the firmware image.

pub mod hardware;
pub mod toml;
pub mod types;

pub use hardware::*;
pub use toml::{parse_board_config, ParseError};
pub use types::*;
