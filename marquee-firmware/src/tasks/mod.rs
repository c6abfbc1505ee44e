//! Embassy async tasks
//!
//! The receive path runs as its own task on the `SWI_IRQ_1` interrupt
//! executor; the dispatch loop lives in the main task in thread mode.

pub mod uart_rx;

pub use uart_rx::uart_rx_task;
