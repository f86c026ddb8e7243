/*
 * Copyright (c) 2025 Dylan Storey
 * Licensed under the Elastic License 2.0.
 * See LICENSE file in the project root for full license text.
 */

//! # VDP Logging Module
//!
//! A small `log` backend shared by the harness crates.
//!
//! ## Usage
//!
//! ```no_run
//! use vdp_utils::logging::{self, prelude::*};
//!
//! logging::init("info", "text").expect("logger");
//! info!("starting run");
//! logging::set_level("debug");
//! ```
//!
//! Lines go to stderr so that the run summary on stdout stays machine readable.
//! With the `json` format every record is a single JSON object carrying
//! `timestamp`, `level`, `target`, `message`, `module`, `file` and `line`.
//!
//! The level can be changed at any time from any thread; unknown level names
//! fall back to `info`.

use log::{LevelFilter, Metadata, Record, SetLoggerError};
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub use log::{debug, error, info, trace, warn};

static LOGGER: VdpLogger = VdpLogger;
static LEVEL: AtomicUsize = AtomicUsize::new(LevelFilter::Info as usize);
static JSON: AtomicBool = AtomicBool::new(false);
static INSTALLED: OnceCell<Result<(), String>> = OnceCell::new();

/// Output format of the logger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    /// `json` (any case) selects JSON lines, anything else is text.
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Format::Json
        } else {
            Format::Text
        }
    }
}

/// The harness logger
pub struct VdpLogger;

impl log::Log for VdpLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= current_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("{}", render(record, current_format()));
    }

    fn flush(&self) {}
}

fn render(record: &Record, format: Format) -> String {
    match format {
        Format::Json => serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "level": record.level().to_string().to_lowercase(),
            "target": record.target(),
            "message": record.args().to_string(),
            "module": record.module_path(),
            "file": record.file(),
            "line": record.line(),
        })
        .to_string(),
        Format::Text => format!(
            "{} - {} [{}]: {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.target(),
            record.args()
        ),
    }
}

/// Installs the logger (once per process) and sets level and format.
///
/// Calling it again only updates level and format.
///
/// # Arguments
/// * `level` - "off", "error", "warn", "info", "debug" or "trace"
/// * `format` - "text" or "json"
pub fn init(level: &str, format: &str) -> Result<(), SetLoggerError> {
    let installed = INSTALLED.get_or_init(|| {
        log::set_logger(&LOGGER)
            .map(|()| log::set_max_level(LevelFilter::Trace))
            .map_err(|e| e.to_string())
    });
    if installed.is_err() {
        // Another logger owns the facade; ours is never called, nothing to configure.
        return Ok(());
    }

    JSON.store(Format::from_name(format) == Format::Json, Ordering::Relaxed);
    set_level(level);
    Ok(())
}

/// Changes the active level.
pub fn set_level(level: &str) {
    let filter = parse_level(level);
    LEVEL.store(filter as usize, Ordering::Relaxed);
    log::set_max_level(filter);
}

/// Returns the active level.
pub fn current_level() -> LevelFilter {
    match LEVEL.load(Ordering::Relaxed) {
        0 => LevelFilter::Off,
        1 => LevelFilter::Error,
        2 => LevelFilter::Warn,
        3 => LevelFilter::Info,
        4 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn current_format() -> Format {
    if JSON.load(Ordering::Relaxed) {
        Format::Json
    } else {
        Format::Text
    }
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

pub mod prelude {
    pub use log::{debug, error, info, trace, warn};
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;
    use serial_test::serial;
    use std::thread;

    #[test]
    #[serial]
    /// Verifies that the logger initializes and applies the requested level.
    ///
    /// This test:
    /// 1. Initializes the logger with the "warn" level and text format
    /// 2. Checks that the current level is Warn
    fn test_init_sets_level() {
        assert!(init("warn", "text").is_ok());
        assert_eq!(current_level(), LevelFilter::Warn);
        set_level("info");
    }

    #[test]
    /// Verifies unknown level names fall back to Info.
    fn test_unknown_level_is_info() {
        assert_eq!(parse_level("loud"), LevelFilter::Info);
        assert_eq!(parse_level("WARNING"), LevelFilter::Warn);
        assert_eq!(parse_level("Trace"), LevelFilter::Trace);
    }

    #[test]
    /// Verifies JSON rendering produces one parseable object per record.
    ///
    /// This test:
    /// 1. Renders a record in JSON format
    /// 2. Parses it back and checks level, message and target
    fn test_render_json() {
        let line = render(
            &Record::builder()
                .args(format_args!("check passed: {}", "health"))
                .level(Level::Info)
                .target("vdp_harness::check")
                .build(),
            Format::Json,
        );
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json");
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["message"], "check passed: health");
        assert_eq!(parsed["target"], "vdp_harness::check");
    }

    #[test]
    /// Verifies text rendering keeps level, target and message on one line.
    fn test_render_text() {
        let line = render(
            &Record::builder()
                .args(format_args!("request failed"))
                .level(Level::Warn)
                .target("vdp_client::rest")
                .build(),
            Format::Text,
        );
        assert!(line.contains("WARN [vdp_client::rest]: request failed"));
        assert!(!line.contains('\n'));
    }

    #[test]
    #[serial]
    /// Ensures level changes from several threads never panic and leave a valid level.
    fn test_concurrent_level_changes() {
        init("info", "text").expect("Failed to initialize logger");

        let handles: Vec<_> = (0..8)
            .map(|i| {
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let level = match rand::random::<u8>() % 4 {
                            0 => "error",
                            1 => "warn",
                            2 => "info",
                            _ => "debug",
                        };
                        set_level(level);
                        info!("thread {} logging", i);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_ne!(current_level(), LevelFilter::Off);
        set_level("info");
    }
}
