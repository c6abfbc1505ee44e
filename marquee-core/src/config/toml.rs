//! Simple TOML parser for board configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `board.toml`. It does NOT support the full TOML grammar and needs no
//! allocator.
//!
//! Supported features:
//! - Key = value pairs (string, integer, boolean)
//! - [section] headers
//! - Comments (# ...), including trailing comments
//!
//! Unknown sections and keys are skipped so that newer config files still
//! boot older firmware. Known keys with bad values are errors.

use heapless::String;

use super::types::{BacklightKind, BoardConfig};
use crate::traits::DISPLAY_ROWS;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed section header
    InvalidSection,
    /// Invalid value type or out of range
    InvalidValue,
    /// String longer than its fixed capacity
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Serial,
    Display,
    Backlight,
    Board,
    Unknown,
}

/// Parse `board.toml` content into a [`BoardConfig`]
///
/// Keys missing from the file keep their [`BoardConfig::default`] values.
pub fn parse_board_config(input: &str) -> Result<BoardConfig, ParseError> {
    let mut config = BoardConfig::default();
    let mut section = Section::Root;

    for line in input.lines() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = parse_section_header(line)?;
            continue;
        }

        if let Some((key, value)) = parse_key_value(line) {
            apply_value(section, key, value, &mut config)?;
        }
    }

    Ok(config)
}

/// Parse a header like "[serial]"
fn parse_section_header(line: &str) -> Result<Section, ParseError> {
    let header = line
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or(ParseError::InvalidSection)?
        .trim();

    if header.is_empty() {
        return Err(ParseError::InvalidSection);
    }

    Ok(match header {
        "serial" => Section::Serial,
        "display" => Section::Display,
        "backlight" => Section::Backlight,
        "board" => Section::Board,
        _ => Section::Unknown,
    })
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut BoardConfig,
) -> Result<(), ParseError> {
    match (section, key) {
        (Section::Serial, "echo") => config.echo = parse_bool(value)?,
        (Section::Display, "message_row") => {
            let row: u8 = parse_int(value)?;
            if row >= DISPLAY_ROWS {
                return Err(ParseError::InvalidValue);
            }
            config.message_row = row;
        }
        (Section::Display, "banner") => {
            config.banner =
                String::try_from(parse_string(value)?).map_err(|_| ParseError::TooLong)?;
        }
        (Section::Backlight, "kind") => {
            config.backlight = match parse_string(value)? {
                "rgb" => BacklightKind::Rgb,
                "pwm" => BacklightKind::Pwm,
                _ => return Err(ParseError::InvalidValue),
            };
        }
        (Section::Backlight, "brightness") => config.brightness = parse_int(value)?,
        (Section::Board, "boot_blinks") => config.boot_blinks = parse_int(value)?,
        (Section::Board, "poll_interval_ms") => {
            let interval: u32 = parse_int(value)?;
            if interval == 0 {
                return Err(ParseError::InvalidValue);
            }
            config.poll_interval_ms = interval;
        }
        _ => {}
    }
    Ok(())
}

/// Split "key = value", dropping trailing comments outside strings
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(line[eq_pos + 1..].trim());

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Cut the value at the first `#` that is not inside a quoted string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, b) in value.bytes().enumerate() {
        match b {
            b'"' => in_string = !in_string,
            b'#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ParseError> {
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        Ok(&value[1..value.len() - 1])
    } else {
        // Allow unquoted strings for simple values
        Ok(value)
    }
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidValue)
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidValue),
    }
}
