//! Marquee - Serial-to-LCD Command Firmware
//!
//! Main firmware binary for RP2040-based boards. Lines typed on UART1
//! are shown on a 16x2 I2C character LCD; `LED_ON` / `LED_OFF` switch the
//! on-board LED.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::i2c::I2c;
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{self as rp_uart, BufferedInterruptHandler, Uart};
use embassy_time::{Delay, Duration, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use marquee_core::config::{
    parse_board_config, BoardConfig, DISPLAY_I2C, PICO_PINS, SERIAL_CONFIG,
};
use marquee_core::traits::TextDisplayExt;
use marquee_core::{Command, Dispatcher, LineReceiver};
use marquee_drivers::{Backlight, CharacterLcd};
use marquee_hal::OutputPin;
use marquee_hal_rp2040::i2c::{self, I2cId};
use marquee_hal_rp2040::uart::{self, UartId};
use marquee_hal_rp2040::{EchoTx, Rp2040Output};

mod tasks;

/// Embedded board configuration (compiled into firmware)
/// Edit board.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../board.toml");

/// Boot blink timing
const BLINK_ON_MS: u64 = 200;
const BLINK_OFF_MS: u64 = 400;

bind_interrupts!(struct Irqs {
    UART1_IRQ => BufferedInterruptHandler<UART1>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Line receiver shared by the RX task and the dispatch loop
static RECEIVER: LineReceiver = LineReceiver::new();

/// Runs the RX task above thread mode, so bytes reach the receiver while
/// the dispatch loop is busy on the display bus.
static RX_EXECUTOR: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    RX_EXECUTOR.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Marquee firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = load_config();
    check_wiring();

    // Board LED doubles as the command indicator
    let mut led = Rp2040Output::new(Output::new(p.PIN_25, Level::Low), PICO_PINS.indicator);

    // Give the operator time to attach a terminal
    for _ in 0..config.boot_blinks {
        led.set_high();
        Timer::after_millis(BLINK_ON_MS).await;
        led.set_low();
        Timer::after_millis(BLINK_OFF_MS).await;
    }

    // Display bus: I2C1, SCL=GPIO15, SDA=GPIO14
    let bus = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c::embassy_config(&DISPLAY_I2C));
    let mut lcd = CharacterLcd::new(bus, Delay, Backlight::from(config.backlight));

    match lcd.init() {
        Ok(()) => info!("LCD initialized ({:?} backlight)", lcd.backlight().kind()),
        Err(e) => error!("LCD init failed: {:?}", e),
    }
    if let Err(e) = lcd.set_brightness(config.brightness) {
        warn!("Backlight brightness not set: {:?}", e);
    }
    if let Err(e) = lcd.show_line(config.banner_row(), config.banner.as_bytes()) {
        warn!("Banner not shown: {:?}", e);
    }

    // Command link: UART1, TX=GPIO8, RX=GPIO9
    let uart_config = match uart::embassy_config(&SERIAL_CONFIG) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Serial format not supported: {:?}, using 115200 8N1", e);
            rp_uart::Config::default()
        }
    };

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART1, p.PIN_8, p.PIN_9, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    RECEIVER.initialize(config.echo);

    // UART1_IRQ must outrank the RX executor so the echo can drain the TX ring
    interrupt::UART1_IRQ.set_priority(Priority::P1);
    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let rx_spawner = RX_EXECUTOR.start(interrupt::SWI_IRQ_1);
    rx_spawner
        .spawn(tasks::uart_rx_task(rx, EchoTx::new(tx), &RECEIVER))
        .unwrap();
    RECEIVER.start();

    info!(
        "UART initialized ({} baud, echo={}), mirroring to row {}",
        SERIAL_CONFIG.baudrate, config.echo, config.message_row
    );

    let mut dispatcher = Dispatcher::new(lcd, led, config.message_row);
    let mut ticker = Ticker::every(Duration::from_millis(config.poll_interval_ms as u64));

    loop {
        if let Some(dispatch) = dispatcher.poll(&RECEIVER) {
            info!("Received: {=[u8]:a}", dispatch.line.as_bytes());
            match dispatch.command {
                Command::LedOn => debug!("LED on"),
                Command::LedOff => debug!("LED off"),
                Command::Text => {}
            }
            if let Err(e) = dispatch.display {
                warn!("Display update failed: {:?}", e);
            }
        }
        ticker.next().await;
    }
}

/// Parse the embedded board.toml, falling back to defaults
fn load_config() -> BoardConfig {
    match parse_board_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Board config loaded: {:?}", config);
            config
        }
        Err(e) => {
            warn!("board.toml rejected ({:?}), using defaults", e);
            BoardConfig::default()
        }
    }
}

/// Log a warning if the pin constants disagree with the peripherals used
fn check_wiring() {
    let pins = PICO_PINS;
    if uart::uart_for_pins(pins.uart_tx.pin, pins.uart_rx.pin) != Some(UartId::Uart1) {
        warn!(
            "GPIO{}/GPIO{} are not UART1 TX/RX",
            pins.uart_tx.pin, pins.uart_rx.pin
        );
    }
    if i2c::i2c_for_pins(pins.i2c_sda.pin, pins.i2c_scl.pin) != Some(I2cId::I2c1) {
        warn!(
            "GPIO{}/GPIO{} are not I2C1 SDA/SCL",
            pins.i2c_sda.pin, pins.i2c_scl.pin
        );
    }
}
