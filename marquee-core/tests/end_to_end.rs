//! Receive-to-display flow with a mock LCD and indicator

use marquee_core::config::LINE_CAPACITY;
use marquee_core::line::Discard;
use marquee_core::traits::DISPLAY_COLS;
use marquee_core::{Command, DisplayError, Dispatcher, LineReceiver, TextDisplay};
use marquee_hal::OutputPin;

const COLS: usize = DISPLAY_COLS as usize;

/// 16x2 panel model: keeps what would actually be visible
struct MockLcd {
    rows: [[u8; COLS]; 2],
    row: usize,
    col: usize,
    printed: Vec<Vec<u8>>,
}

impl MockLcd {
    fn new() -> Self {
        Self {
            rows: [[b' '; COLS]; 2],
            row: 0,
            col: 0,
            printed: Vec::new(),
        }
    }

    fn visible(&self, row: usize) -> &[u8] {
        &self.rows[row]
    }
}

impl TextDisplay for MockLcd {
    fn clear_line(&mut self, row: u8) -> Result<(), DisplayError> {
        self.rows[row as usize] = [b' '; COLS];
        self.set_cursor(row, 0)
    }

    fn print(&mut self, text: &[u8]) -> Result<(), DisplayError> {
        self.printed.push(text.to_vec());
        for &b in text.iter().take_while(|&&b| b != 0) {
            if self.col >= COLS {
                break;
            }
            self.rows[self.row][self.col] = b;
            self.col += 1;
        }
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row > 1 || col as usize >= COLS {
            return Err(DisplayError::InvalidPosition);
        }
        self.row = row as usize;
        self.col = col as usize;
        Ok(())
    }
}

#[derive(Default)]
struct Led {
    on: bool,
}

impl OutputPin for Led {
    fn set_high(&mut self) {
        self.on = true;
    }

    fn set_low(&mut self) {
        self.on = false;
    }

    fn is_set_high(&self) -> bool {
        self.on
    }
}

fn send(rx: &LineReceiver, bytes: &[u8]) {
    for &b in bytes {
        rx.on_byte_received(b, &mut Discard);
    }
}

fn armed_receiver() -> LineReceiver {
    let rx = LineReceiver::new();
    rx.initialize(false);
    rx.start();
    rx
}

#[test]
fn led_on_lights_indicator_and_mirrors_line() {
    let rx = armed_receiver();
    let mut dispatcher = Dispatcher::new(MockLcd::new(), Led::default(), 1);

    send(&rx, b"LED_ON\r");
    assert_eq!(rx.completed_len(), 6);

    let dispatch = dispatcher.poll(&rx).expect("line pending");
    assert_eq!(dispatch.command, Command::LedOn);
    assert!(dispatcher.indicator().is_set_high());
    assert_eq!(dispatcher.display().visible(1), b"LED_ON          ");
    assert_eq!(dispatcher.display().visible(0), b"                ");

    assert_eq!(rx.completed_len(), 0);
    assert!(dispatcher.poll(&rx).is_none());
}

#[test]
fn long_line_is_printed_whole_and_rendered_truncated() {
    let rx = armed_receiver();
    let mut dispatcher = Dispatcher::new(MockLcd::new(), Led::default(), 1);
    let text: &[u8] = b"hello world test 1234567890123456789";
    assert!(text.len() < LINE_CAPACITY);

    send(&rx, text);
    send(&rx, b"\r");
    assert_eq!(rx.completed_len(), text.len());

    let dispatch = dispatcher.poll(&rx).expect("line pending");
    assert_eq!(dispatch.command, Command::Text);
    assert_eq!(dispatch.line.as_bytes(), text);
    assert!(!dispatcher.indicator().is_set_high());

    let lcd = dispatcher.display();
    assert_eq!(lcd.printed, vec![text.to_vec()]);
    assert_eq!(lcd.visible(1), b"hello world test");
    assert_eq!(rx.completed_len(), 0);
    assert_eq!(rx.cursor(), 0);
}

#[test]
fn stop_ignores_input_until_restarted() {
    let rx = armed_receiver();
    let mut dispatcher = Dispatcher::new(MockLcd::new(), Led::default(), 1);

    send(&rx, b"LED_O");
    rx.stop();
    send(&rx, b"N\rLED_ON\r");
    assert_eq!(rx.cursor(), 0);
    assert!(dispatcher.poll(&rx).is_none());
    assert!(!dispatcher.indicator().is_set_high());

    rx.start();
    send(&rx, b"LED_OFF\r");
    let dispatch = dispatcher.poll(&rx).expect("line pending");
    assert_eq!(dispatch.line.as_bytes(), b"LED_OFF");
}

#[test]
fn lines_are_handled_one_at_a_time() {
    let rx = armed_receiver();
    let mut dispatcher = Dispatcher::new(MockLcd::new(), Led::default(), 1);

    // The second line arrives before the first is consumed and is lost
    send(&rx, b"LED_ON\rLED_OFF\r");
    let first = dispatcher.poll(&rx).expect("line pending");
    assert_eq!(first.command, Command::LedOn);
    assert!(dispatcher.poll(&rx).is_none());
    assert!(dispatcher.indicator().is_set_high());
}
