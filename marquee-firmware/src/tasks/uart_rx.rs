//! UART receive task
//!
//! Drains the interrupt-fed RX ring and hands every byte to the line
//! receiver, which also emits the echo. Spawned on the interrupt executor:
//! it preempts the dispatch loop, so bytes that arrive while a line is
//! pending are dropped instead of queueing behind it.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use marquee_core::LineReceiver;
use marquee_hal_rp2040::EchoTx;

/// Bytes taken from the RX ring per wakeup
const RX_CHUNK: usize = 32;

/// Receive path - feeds bytes into the shared line receiver
#[embassy_executor::task]
pub async fn uart_rx_task(
    mut rx: BufferedUartRx,
    mut echo: EchoTx,
    receiver: &'static LineReceiver,
) {
    info!("UART RX task started");

    let mut buf = [0u8; RX_CHUNK];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) => {
                trace!("RX: {} bytes", n);
                for &byte in &buf[..n] {
                    receiver.on_byte_received(byte, &mut echo);
                }
            }
            Err(e) => {
                // Framing/parity errors drop the bad byte; keep reading
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
