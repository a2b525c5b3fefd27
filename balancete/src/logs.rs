//! Pipeline progress logging.
//!
//! Thin helpers over `tracing` so pipeline code reads as a sequence of
//! status lines. The binary decides where the events go by installing a
//! subscriber; library users get nothing unless they install one themselves.

use tracing::{error, info, warn};

/// Log level of a pipeline status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Emit a status line at the given level.
pub fn log(level: LogLevel, msg: impl AsRef<str>) {
    let msg = msg.as_ref();
    match level {
        LogLevel::Info => info!("{}", msg),
        LogLevel::Success => info!(status = "success", "{}", msg),
        LogLevel::Warning => warn!("{}", msg),
        LogLevel::Error => error!("{}", msg),
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl AsRef<str>) {
    log(LogLevel::Info, msg);
}

pub fn log_success(msg: impl AsRef<str>) {
    log(LogLevel::Success, msg);
}

pub fn log_warning(msg: impl AsRef<str>) {
    log(LogLevel::Warning, msg);
}

pub fn log_error(msg: impl AsRef<str>) {
    log(LogLevel::Error, msg);
}
