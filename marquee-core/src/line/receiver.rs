//! Shared line receiver
//!
//! One `LineReceiver` lives in a `static` and is shared by exactly two
//! parties: the UART receive path (producer, calls
//! [`LineReceiver::on_byte_received`]) and the dispatch loop (consumer,
//! polls [`LineReceiver::completed_len`], copies the line, then calls
//! [`LineReceiver::clear`]).
//!
//! The completed length is the handoff flag. It is stored with `Release`
//! after the terminator and length are in place, and loaded with
//! `Acquire` by the consumer. While it is non-zero the producer drops every
//! byte, so the consumer may read the buffer until it clears the flag.
//! Buffer access itself goes through a critical-section mutex, which also
//! makes the armed check and the byte handling a single step with respect
//! to [`LineReceiver::stop`].

use core::cell::RefCell;
use core::convert::Infallible;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::Vec;
use marquee_hal::UartTx;
use portable_atomic::{AtomicBool, AtomicU16, Ordering};

use super::buffer::{Feed, LineBuffer};
use crate::config::{BACKSPACE, LINE_CAPACITY};

/// Echo for an erased character: back up, blank it, back up again
const ERASE_ECHO: [u8; 3] = [BACKSPACE, b' ', BACKSPACE];

/// Echo for a terminator
const LINE_END_ECHO: [u8; 2] = [b'\n', b'\r'];

/// Owned copy of a completed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl Line {
    fn from_slice(bytes: &[u8]) -> Self {
        let bytes = &bytes[..bytes.len().min(LINE_CAPACITY)];
        Self {
            bytes: Vec::from_slice(bytes).unwrap_or_default(),
        }
    }

    /// Line content without the terminator
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Line length in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false for lines handed out by the receiver
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Line as text, if it is valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.bytes).ok()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Line {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[u8]:a}", self.as_bytes());
    }
}

/// Transmitter that swallows echo output
///
/// Used when there is no transmit half to echo on (host tests, receive-only
/// wiring). With echo disabled nothing is ever written to it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl UartTx for Discard {
    type Error = Infallible;

    fn write_blocking(&mut self, _data: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Line receiver shared between the receive path and the main loop
pub struct LineReceiver {
    buffer: Mutex<CriticalSectionRawMutex, RefCell<LineBuffer>>,
    /// Mirror of the buffer's completed length, readable without the lock
    completed: AtomicU16,
    armed: AtomicBool,
    echo: AtomicBool,
}

impl Default for LineReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReceiver {
    /// Create a disarmed, empty receiver (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            buffer: Mutex::new(RefCell::new(LineBuffer::new())),
            completed: AtomicU16::new(0),
            armed: AtomicBool::new(false),
            echo: AtomicBool::new(false),
        }
    }

    /// Reset to the boot state: empty, disarmed, with the given echo setting
    ///
    /// The transport format itself is applied by the HAL when the UART is
    /// constructed; this only prepares the software side.
    pub fn initialize(&self, echo: bool) {
        self.buffer.lock(|cell| {
            self.armed.store(false, Ordering::Release);
            self.echo.store(echo, Ordering::Relaxed);
            cell.borrow_mut().clear();
            self.completed.store(0, Ordering::Release);
        });
    }

    /// Arm reception
    pub fn start(&self) {
        self.armed.store(true, Ordering::Release);
    }

    /// Disarm reception and drop any partial or pending line
    pub fn stop(&self) {
        self.buffer.lock(|cell| {
            self.armed.store(false, Ordering::Release);
            cell.borrow_mut().clear();
            self.completed.store(0, Ordering::Release);
        });
    }

    /// Whether the receive path is armed
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }

    /// Whether received characters are echoed
    pub fn echo_enabled(&self) -> bool {
        self.echo.load(Ordering::Relaxed)
    }

    /// Handle one byte from the UART receive path
    ///
    /// Never blocks except on the echo transmit, and never fails: echo
    /// errors are ignored because the receive path has nobody to tell.
    pub fn on_byte_received<T: UartTx>(&self, byte: u8, tx: &mut T) -> Feed {
        let feed = self.buffer.lock(|cell| {
            if !self.armed.load(Ordering::Acquire) {
                return Feed::Disarmed;
            }
            let feed = cell.borrow_mut().feed(byte);
            if let Feed::Completed(len) = feed {
                // Terminator and length are written; publish
                self.completed.store(len as u16, Ordering::Release);
            }
            feed
        });

        if self.echo_enabled() {
            let _ = match feed {
                Feed::Stored | Feed::Wrapped => tx.write_byte(byte),
                Feed::Erased => tx.write_blocking(&ERASE_ECHO),
                Feed::Completed(_) => tx.write_blocking(&LINE_END_ECHO),
                Feed::Disarmed | Feed::Dropped | Feed::Ignored => Ok(()),
            };
        }

        feed
    }

    /// Length of the pending line, 0 when none
    ///
    /// Lock-free; safe to poll every tick.
    pub fn completed_len(&self) -> usize {
        self.completed.load(Ordering::Acquire) as usize
    }

    /// Current write cursor (diagnostics)
    pub fn cursor(&self) -> usize {
        self.buffer.lock(|cell| cell.borrow().cursor())
    }

    /// Copy of the pending line, if any
    ///
    /// The line stays pending until [`LineReceiver::clear`] is called.
    pub fn line(&self) -> Option<Line> {
        if self.completed_len() == 0 {
            return None;
        }
        // Re-check under the lock; stop() may have run in between
        self.buffer.lock(|cell| {
            let buffer = cell.borrow();
            (buffer.completed_len() > 0).then(|| Line::from_slice(buffer.pending()))
        })
    }

    /// Release the pending line and rewind the cursor
    ///
    /// Must be called by the consumer once it is done with a line; this is
    /// what lets the receive path start filling the buffer again.
    pub fn clear(&self) {
        self.buffer.lock(|cell| {
            cell.borrow_mut().clear();
            self.completed.store(0, Ordering::Release);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CARRIAGE_RETURN;
    use std::vec::Vec as StdVec;

    /// Mock UART transmitter recording everything written
    #[derive(Default)]
    struct RecordingTx {
        written: StdVec<u8>,
    }

    impl UartTx for RecordingTx {
        type Error = Infallible;

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
            self.written.extend_from_slice(data);
            Ok(())
        }
    }

    fn armed(echo: bool) -> LineReceiver {
        let receiver = LineReceiver::new();
        receiver.initialize(echo);
        receiver.start();
        receiver
    }

    fn deliver<T: UartTx>(receiver: &LineReceiver, bytes: &[u8], tx: &mut T) {
        for &b in bytes {
            receiver.on_byte_received(b, tx);
        }
    }

    #[test]
    fn test_disarmed_at_boot() {
        let receiver = LineReceiver::new();
        receiver.initialize(false);
        assert!(!receiver.is_armed());
        assert_eq!(receiver.on_byte_received(b'a', &mut Discard), Feed::Disarmed);
        assert_eq!(receiver.cursor(), 0);
    }

    #[test]
    fn test_completed_line_is_published() {
        let receiver = armed(false);
        deliver(&receiver, b"LED_ON", &mut Discard);
        assert_eq!(receiver.completed_len(), 0);
        assert!(receiver.line().is_none());

        assert_eq!(
            receiver.on_byte_received(CARRIAGE_RETURN, &mut Discard),
            Feed::Completed(6)
        );
        assert_eq!(receiver.completed_len(), 6);
        assert_eq!(receiver.line().unwrap().as_bytes(), b"LED_ON");

        // Reading does not consume
        assert_eq!(receiver.completed_len(), 6);
        receiver.clear();
        assert_eq!(receiver.completed_len(), 0);
        assert!(receiver.line().is_none());
    }

    #[test]
    fn test_second_line_waits_for_clear() {
        let receiver = armed(false);
        deliver(&receiver, b"one\rtwo\r", &mut Discard);
        assert_eq!(receiver.line().unwrap().as_bytes(), b"one");

        receiver.clear();
        deliver(&receiver, b"two\r", &mut Discard);
        assert_eq!(receiver.line().unwrap().as_bytes(), b"two");
    }

    #[test]
    fn test_stop_discards_and_blocks_input() {
        let receiver = armed(false);
        deliver(&receiver, b"partial", &mut Discard);
        receiver.stop();
        assert!(!receiver.is_armed());
        assert_eq!(receiver.cursor(), 0);

        deliver(&receiver, b"ignored\r", &mut Discard);
        assert_eq!(receiver.cursor(), 0);
        assert_eq!(receiver.completed_len(), 0);

        receiver.start();
        deliver(&receiver, b"fresh\r", &mut Discard);
        assert_eq!(receiver.line().unwrap().as_bytes(), b"fresh");
    }

    #[test]
    fn test_stop_drops_pending_line() {
        let receiver = armed(false);
        deliver(&receiver, b"stale\r", &mut Discard);
        receiver.stop();
        receiver.start();
        assert_eq!(receiver.completed_len(), 0);
        assert!(receiver.line().is_none());
    }

    #[test]
    fn test_echo_sequences() {
        let receiver = armed(true);
        let mut tx = RecordingTx::default();

        deliver(&receiver, b"ab", &mut tx);
        receiver.on_byte_received(BACKSPACE, &mut tx);
        receiver.on_byte_received(CARRIAGE_RETURN, &mut tx);
        assert_eq!(tx.written.as_slice(), b"ab\x08 \x08\n\r");

        // Dropped bytes are not echoed
        tx.written.clear();
        deliver(&receiver, b"xyz", &mut tx);
        assert!(tx.written.is_empty());
    }

    #[test]
    fn test_backspace_on_empty_line_is_not_echoed() {
        let receiver = armed(true);
        let mut tx = RecordingTx::default();
        receiver.on_byte_received(BACKSPACE, &mut tx);
        assert!(tx.written.is_empty());
    }

    #[test]
    fn test_no_echo_when_disabled() {
        let receiver = armed(false);
        let mut tx = RecordingTx::default();
        deliver(&receiver, b"hello\x7f\r", &mut tx);
        assert!(tx.written.is_empty());
        assert_eq!(receiver.line().unwrap().as_bytes(), b"hell");
    }

    #[test]
    fn test_initialize_resets_everything() {
        let receiver = armed(true);
        deliver(&receiver, b"abc\r", &mut Discard);
        receiver.initialize(false);
        assert!(!receiver.is_armed());
        assert!(!receiver.echo_enabled());
        assert_eq!(receiver.completed_len(), 0);
        assert_eq!(receiver.cursor(), 0);
    }

    #[test]
    fn test_line_copy_is_bounded() {
        let line = Line::from_slice(&[b'x'; LINE_CAPACITY + 4]);
        assert_eq!(line.len(), LINE_CAPACITY);
        assert!(line.as_bytes().iter().all(|&b| b == b'x'));
    }

    #[test]
    fn test_shared_across_threads() {
        static RECEIVER: LineReceiver = LineReceiver::new();
        RECEIVER.initialize(false);
        RECEIVER.start();

        let producer = std::thread::spawn(|| {
            for &b in b"LED_OFF\r" {
                RECEIVER.on_byte_received(b, &mut Discard);
            }
        });
        producer.join().unwrap();

        assert_eq!(RECEIVER.completed_len(), 7);
        assert_eq!(RECEIVER.line().unwrap().as_str(), Some("LED_OFF"));
        RECEIVER.clear();
    }

    #[test]
    fn test_handoff_under_concurrent_feed() {
        const LINES: usize = 200;

        fn expected(i: usize) -> (u8, usize) {
            (b'a' + (i % 26) as u8, 1 + i % 20)
        }

        let receiver = armed(false);

        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 0..LINES {
                    // Wait for the consumer to release the previous line
                    while receiver.completed_len() != 0 {
                        std::thread::yield_now();
                    }
                    let (byte, len) = expected(i);
                    for _ in 0..len {
                        receiver.on_byte_received(byte, &mut Discard);
                    }
                    receiver.on_byte_received(CARRIAGE_RETURN, &mut Discard);
                }
            });

            let mut seen = 0;
            while seen < LINES {
                if receiver.completed_len() == 0 {
                    std::thread::yield_now();
                    continue;
                }
                let line = receiver.line().unwrap();
                let (byte, len) = expected(seen);
                assert_eq!(line.len(), len, "line {seen}");
                assert!(line.as_bytes().iter().all(|&b| b == byte), "line {seen}");
                receiver.clear();
                seen += 1;
            }
        });

        assert_eq!(receiver.completed_len(), 0);
        assert_eq!(receiver.cursor(), 0);
    }
}
