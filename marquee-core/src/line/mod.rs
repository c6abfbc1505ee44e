//! Line reception
//!
//! Converts the byte stream arriving on the command UART into discrete,
//! NUL-terminated lines and hands them to the main loop one at a time.
//!
//! ```text
//!  UART RX ──► LineReceiver::on_byte_received ──► LineBuffer (accumulate / latch)
//!                                                        │
//!                                             completed length (atomic)
//!                                                        │
//!  main loop ──► completed_len() ─► line() ─► act ─► clear() ◄──┘
//! ```
//!
//! [`LineBuffer`] is the pure state machine; [`LineReceiver`] wraps it in a
//! critical-section mutex and publishes the completed length through an
//! atomic so the consumer can poll without taking the lock.

pub mod buffer;
pub mod receiver;

pub use buffer::{Feed, LineBuffer};
pub use receiver::{Discard, Line, LineReceiver};
