//! Line dispatcher
//!
//! Consumer side of the [`LineReceiver`] handoff. Each call to
//! [`Dispatcher::poll`] handles at most one line:
//!
//! 1. Check the completed length (lock-free)
//! 2. Copy the line out
//! 3. Apply the command to the indicator
//! 4. Clear the message row and print the line on it
//! 5. Release the receiver so the next line can arrive
//!
//! The receiver is released even when the display write fails. A stuck
//! display must not stop commands from reaching the indicator.

use marquee_hal::OutputPin;

use crate::command::Command;
use crate::line::{Line, LineReceiver};
use crate::traits::{DisplayError, TextDisplay};

/// Result of handling one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Parsed command
    pub command: Command,
    /// The line as received
    pub line: Line,
    /// Outcome of the display update
    pub display: Result<(), DisplayError>,
}

/// Routes completed lines to the indicator and the display
pub struct Dispatcher<D, P> {
    display: D,
    indicator: P,
    row: u8,
}

impl<D: TextDisplay, P: OutputPin> Dispatcher<D, P> {
    /// Create a dispatcher that mirrors lines onto `row`
    pub fn new(display: D, indicator: P, row: u8) -> Self {
        Self {
            display,
            indicator,
            row,
        }
    }

    /// Handle the pending line, if there is one
    pub fn poll(&mut self, rx: &LineReceiver) -> Option<Dispatch> {
        if rx.completed_len() == 0 {
            return None;
        }

        let line = match rx.line() {
            Some(line) => line,
            // Receiver was stopped between the length check and the copy
            None => return None,
        };

        let command = Command::parse(line.as_bytes());
        if let Some(high) = command.indicator_state() {
            self.indicator.set_state(high);
        }

        let display = self
            .display
            .clear_line(self.row)
            .and_then(|()| self.display.print(line.as_bytes()));

        rx.clear();

        Some(Dispatch {
            command,
            line,
            display,
        })
    }

    /// Row lines are printed on
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Access the display (e.g. to draw a banner)
    pub fn display(&mut self) -> &mut D {
        &mut self.display
    }

    /// Access the indicator output
    pub fn indicator(&self) -> &P {
        &self.indicator
    }
}
