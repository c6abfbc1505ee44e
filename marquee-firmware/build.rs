//! Build script for marquee-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates board.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Visible characters per LCD row
const DISPLAY_COLS: usize = 16;

/// LCD rows
const DISPLAY_ROWS: i64 = 2;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate board.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=board.toml");

    let config_path = Path::new("board.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: board.toml not found!                                    ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds board.toml at build time.                   ║\n\
            ║  Please create one in the marquee-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read board.toml                                ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in board.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_required_sections(&config, &mut errors);
    validate_serial(&config, &mut errors);
    validate_display(&config, &mut errors);
    validate_backlight(&config, &mut errors);
    validate_board(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid board configuration                              ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=board.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn validate_required_sections(config: &toml::Value, errors: &mut Vec<String>) {
    for section in ["serial", "display", "backlight", "board"] {
        match config.get(section) {
            Some(toml::Value::Table(_)) => {}
            Some(_) => errors.push(format!("[{}] must be a table", section)),
            None => errors.push(format!("Missing [{}] section", section)),
        }
    }
}

fn validate_serial(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(serial) = config.get("serial") else {
        return;
    };
    if let Some(echo) = serial.get("echo") {
        if !echo.is_bool() {
            errors.push("[serial] echo must be true or false".to_string());
        }
    }
}

fn validate_display(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(display) = config.get("display") else {
        return;
    };

    match display.get("message_row") {
        Some(toml::Value::Integer(row)) if (0..DISPLAY_ROWS).contains(row) => {}
        Some(_) => errors.push(format!("[display] message_row must be 0-{}", DISPLAY_ROWS - 1)),
        None => {}
    }

    match display.get("banner") {
        Some(toml::Value::String(banner)) => {
            if banner.len() > DISPLAY_COLS {
                errors.push(format!(
                    "[display] banner longer than {} characters",
                    DISPLAY_COLS
                ));
            }
        }
        Some(_) => errors.push("[display] banner must be a string".to_string()),
        None => {}
    }
}

fn validate_backlight(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(backlight) = config.get("backlight") else {
        return;
    };

    match backlight.get("kind") {
        Some(toml::Value::String(kind)) if ["rgb", "pwm"].contains(&kind.as_str()) => {}
        Some(_) => errors.push("[backlight] kind must be 'rgb' or 'pwm'".to_string()),
        None => {}
    }

    match backlight.get("brightness") {
        Some(toml::Value::Integer(b)) if (0..=255).contains(b) => {}
        Some(_) => errors.push("[backlight] brightness must be 0-255".to_string()),
        None => {}
    }
}

fn validate_board(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(board) = config.get("board") else {
        return;
    };

    match board.get("boot_blinks") {
        Some(toml::Value::Integer(n)) if (0..=255).contains(n) => {}
        Some(_) => errors.push("[board] boot_blinks must be 0-255".to_string()),
        None => {}
    }

    match board.get("poll_interval_ms") {
        Some(toml::Value::Integer(ms)) if (1..=1000).contains(ms) => {}
        Some(_) => errors.push("[board] poll_interval_ms must be 1-1000".to_string()),
        None => {}
    }
}
