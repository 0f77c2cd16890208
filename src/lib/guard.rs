//! Process-wide last-resort failure handling.
//!
//! A panic that escapes every handler, whether on the main task or on a task
//! spawned onto the runtime, is logged once and terminates the process. In-flight
//! protocol state cannot be trusted after that point, so nothing is resumed.

use std::{any::Any, process};

use tracing::error;

/// Exit status used when the guard terminates the process.
pub const GUARD_EXIT_CODE: i32 = 1;

/// Install the panic hook. Call once, after tracing is initialized.
pub fn install() {
    std::panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let location = info
            .location()
            .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_else(|| "<unknown>".to_string());
        let thread = std::thread::current();
        error!(
            target: "kagi_mcp::guard",
            message = %message,
            location = %location,
            thread = thread.name().unwrap_or("<unnamed>"),
            exit_code = GUARD_EXIT_CODE,
            "Unhandled panic; terminating process"
        );
        process::exit(GUARD_EXIT_CODE);
    }));
}

/// Extract a printable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "non-string panic payload".to_string()
}
