//! Receive buffer state machine
//!
//! Byte handling rules:
//! - A completed line is pending: every byte is dropped until [`LineBuffer::clear`]
//! - BS (8) / DEL (127): erase the last buffered byte, no-op when empty
//! - CR (13): latch the line (NUL-terminate, record its length, rewind cursor)
//! - Anything else: store and advance; the cursor wraps to 0 at
//!   [`LINE_CAPACITY`], overwriting the start of the partial line
//!
//! None of these report errors. The producer runs in interrupt context
//! where there is nobody to report to.

use crate::config::{BACKSPACE, BUFFER_SIZE, CARRIAGE_RETURN, DELETE, LINE_CAPACITY};

/// What a single byte did to the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Feed {
    /// Reception is disarmed; the byte never reached the buffer
    Disarmed,
    /// A completed line is still pending; byte discarded
    Dropped,
    /// Backspace/delete removed the last byte
    Erased,
    /// Backspace/delete with nothing to erase
    Ignored,
    /// Byte stored
    Stored,
    /// Byte stored in the last slot and the cursor wrapped to 0
    Wrapped,
    /// Terminator received; carries the line length (0 for an empty line,
    /// which publishes nothing)
    Completed(usize),
}

/// Fixed-capacity line accumulator
#[derive(Debug, Clone)]
pub struct LineBuffer {
    bytes: [u8; BUFFER_SIZE],
    /// Next free slot, always < LINE_CAPACITY
    cursor: usize,
    /// Length of the pending line, 0 when idle
    completed: usize,
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    /// Create an empty buffer
    pub const fn new() -> Self {
        Self {
            bytes: [0; BUFFER_SIZE],
            cursor: 0,
            completed: 0,
        }
    }

    /// Process one received byte
    pub fn feed(&mut self, byte: u8) -> Feed {
        if self.completed > 0 {
            return Feed::Dropped;
        }

        match byte {
            BACKSPACE | DELETE => {
                if self.cursor == 0 {
                    return Feed::Ignored;
                }
                self.cursor -= 1;
                Feed::Erased
            }
            CARRIAGE_RETURN => {
                let len = self.cursor;
                self.bytes[len] = 0;
                self.cursor = 0;
                self.completed = len;
                Feed::Completed(len)
            }
            _ => {
                self.bytes[self.cursor] = byte;
                self.cursor += 1;
                if self.cursor >= LINE_CAPACITY {
                    self.cursor = 0;
                    Feed::Wrapped
                } else {
                    Feed::Stored
                }
            }
        }
    }

    /// Drop any partial or pending line
    pub fn clear(&mut self) {
        self.cursor = 0;
        self.completed = 0;
    }

    /// Current write cursor
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Length of the pending line (0 = none)
    pub fn completed_len(&self) -> usize {
        self.completed
    }

    /// Bytes of the pending line, without the terminator
    pub fn pending(&self) -> &[u8] {
        &self.bytes[..self.completed]
    }

    /// Raw buffer contents, including stale bytes past the cursor
    #[cfg(test)]
    pub fn raw(&self) -> &[u8; BUFFER_SIZE] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn feed_all(buffer: &mut LineBuffer, bytes: &[u8]) {
        for &b in bytes {
            buffer.feed(b);
        }
    }

    /// Any byte that is neither a terminator nor an erase code
    fn plain_byte() -> impl Strategy<Value = u8> {
        any::<u8>().prop_filter("control byte", |b| {
            !matches!(*b, CARRIAGE_RETURN | BACKSPACE | DELETE)
        })
    }

    proptest! {
        #[test]
        fn prop_plain_bytes_advance_cursor(
            bytes in prop::collection::vec(plain_byte(), 0..LINE_CAPACITY)
        ) {
            let mut buffer = LineBuffer::new();
            feed_all(&mut buffer, &bytes);
            prop_assert_eq!(buffer.cursor(), bytes.len());
            prop_assert_eq!(buffer.completed_len(), 0);
        }

        #[test]
        fn prop_terminator_latches_line(
            bytes in prop::collection::vec(plain_byte(), 0..LINE_CAPACITY)
        ) {
            let mut buffer = LineBuffer::new();
            feed_all(&mut buffer, &bytes);
            prop_assert_eq!(buffer.feed(CARRIAGE_RETURN), Feed::Completed(bytes.len()));
            prop_assert_eq!(buffer.completed_len(), bytes.len());
            prop_assert_eq!(buffer.pending(), bytes.as_slice());
            prop_assert_eq!(buffer.raw()[bytes.len()], 0);
            prop_assert_eq!(buffer.cursor(), 0);
        }

        #[test]
        fn prop_pending_line_is_immutable(
            line in prop::collection::vec(plain_byte(), 1..LINE_CAPACITY),
            noise in prop::collection::vec(any::<u8>(), 0..300)
        ) {
            let mut buffer = LineBuffer::new();
            feed_all(&mut buffer, &line);
            buffer.feed(CARRIAGE_RETURN);
            let before = *buffer.raw();

            for &b in &noise {
                prop_assert_eq!(buffer.feed(b), Feed::Dropped);
            }
            prop_assert_eq!(buffer.feed(CARRIAGE_RETURN), Feed::Dropped);
            prop_assert_eq!(buffer.raw(), &before);
            prop_assert_eq!(buffer.completed_len(), line.len());
            prop_assert_eq!(buffer.cursor(), 0);
        }

        #[test]
        fn prop_backspace_removes_one(
            bytes in prop::collection::vec(plain_byte(), 1..LINE_CAPACITY),
            erase in prop_oneof![Just(BACKSPACE), Just(DELETE)]
        ) {
            let mut buffer = LineBuffer::new();
            feed_all(&mut buffer, &bytes);
            prop_assert_eq!(buffer.feed(erase), Feed::Erased);
            prop_assert_eq!(buffer.cursor(), bytes.len() - 1);
            prop_assert_eq!(buffer.completed_len(), 0);
        }
    }

    #[test]
    fn test_backspace_on_empty_buffer() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.feed(BACKSPACE), Feed::Ignored);
        assert_eq!(buffer.feed(DELETE), Feed::Ignored);
        assert_eq!(buffer.cursor(), 0);
        assert_eq!(buffer.completed_len(), 0);
    }

    #[test]
    fn test_backspace_edits_line() {
        let mut buffer = LineBuffer::new();
        feed_all(&mut buffer, b"LED_OX");
        buffer.feed(BACKSPACE);
        feed_all(&mut buffer, b"N\r");
        assert_eq!(buffer.pending(), b"LED_ON");
    }

    #[test]
    fn test_overflow_wraps_to_start() {
        let mut buffer = LineBuffer::new();
        for i in 0..LINE_CAPACITY - 1 {
            assert_eq!(buffer.feed(b'a' + (i % 26) as u8), Feed::Stored);
        }
        assert_eq!(buffer.feed(b'z'), Feed::Wrapped);
        assert_eq!(buffer.cursor(), 0);

        feed_all(&mut buffer, b"12345");
        assert_eq!(buffer.cursor(), 5);
        assert_eq!(&buffer.raw()[..5], b"12345");
        assert_eq!(buffer.raw()[LINE_CAPACITY - 1], b'z');
        assert_eq!(buffer.completed_len(), 0);
    }

    #[test]
    fn test_empty_line_publishes_nothing() {
        let mut buffer = LineBuffer::new();
        assert_eq!(buffer.feed(CARRIAGE_RETURN), Feed::Completed(0));
        assert_eq!(buffer.completed_len(), 0);
        // Still accepting input
        assert_eq!(buffer.feed(b'x'), Feed::Stored);
    }

    #[test]
    fn test_clear_rearms_reception() {
        let mut buffer = LineBuffer::new();
        feed_all(&mut buffer, b"first\r");
        assert_eq!(buffer.feed(b'x'), Feed::Dropped);

        buffer.clear();
        assert_eq!(buffer.completed_len(), 0);
        feed_all(&mut buffer, b"second\r");
        assert_eq!(buffer.pending(), b"second");
    }

    #[test]
    fn test_line_feed_is_payload() {
        // Only CR terminates; a CRLF sender leaves LF at the start of the next line
        let mut buffer = LineBuffer::new();
        feed_all(&mut buffer, b"a\r");
        buffer.clear();
        feed_all(&mut buffer, b"\nb\r");
        assert_eq!(buffer.pending(), b"\nb");
    }
}
