//! UART support
//!
//! RP2040 has two UART peripherals (UART0 and UART1), each reachable from
//! a fixed set of GPIOs. This module maps the board-agnostic frame format
//! onto embassy-rp's config and provides the blocking transmitter used for
//! echo.

use embassy_rp::uart::{self, BufferedUartTx};
use embedded_io::Write;
use marquee_hal::{DataBits, Parity, StopBits, UartConfig, UartTx};

use crate::gpio::GPIO_COUNT;

/// UART peripheral identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartId {
    Uart0,
    Uart1,
}

/// Pin function within a UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartPin {
    Tx,
    Rx,
    Cts,
    Rts,
}

/// Frame format the RP2040 UART cannot produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartConfigError {
    /// PL011 frames carry at most 8 data bits
    UnsupportedDataBits,
    /// Flow control needs CTS/RTS pins, which this board does not route
    FlowControlUnavailable,
}

/// Determine which UART and function a GPIO pin can carry
///
/// GPIOs repeat in groups of four (TX, RX, CTS, RTS), alternating between
/// UART0 and UART1 every eight pins starting from UART0 at GPIO0:
/// UART0 on 0-3, 12-19, 28-29; UART1 on 4-11, 20-27.
pub fn gpio_to_uart(gpio: u8) -> Option<(UartId, UartPin)> {
    if gpio >= GPIO_COUNT {
        return None;
    }
    let id = if ((gpio + 4) / 8) % 2 == 0 {
        UartId::Uart0
    } else {
        UartId::Uart1
    };
    let pin = match gpio % 4 {
        0 => UartPin::Tx,
        1 => UartPin::Rx,
        2 => UartPin::Cts,
        _ => UartPin::Rts,
    };
    Some((id, pin))
}

/// UART that can use `tx` as TX and `rx` as RX, if both belong to the same one
pub fn uart_for_pins(tx: u8, rx: u8) -> Option<UartId> {
    match (gpio_to_uart(tx)?, gpio_to_uart(rx)?) {
        ((tx_id, UartPin::Tx), (rx_id, UartPin::Rx)) if tx_id == rx_id => Some(tx_id),
        _ => None,
    }
}

/// Map a frame format onto embassy-rp's UART config
pub fn embassy_config(config: &UartConfig) -> Result<uart::Config, UartConfigError> {
    if config.hardware_flow_control {
        return Err(UartConfigError::FlowControlUnavailable);
    }

    let mut out = uart::Config::default();
    out.baudrate = config.baudrate;
    out.data_bits = match config.data_bits {
        DataBits::Five => uart::DataBits::DataBits5,
        DataBits::Six => uart::DataBits::DataBits6,
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
        DataBits::Nine => return Err(UartConfigError::UnsupportedDataBits),
    };
    out.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    out.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    Ok(out)
}

/// Blocking transmitter for echo
///
/// Writes go into the buffered UART's TX ring and only block while it is
/// full, so echo never stalls for longer than a few character times.
pub struct EchoTx {
    tx: BufferedUartTx,
}

impl EchoTx {
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl UartTx for EchoTx {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }
}
